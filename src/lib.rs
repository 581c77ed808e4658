pub mod aggregate;
pub mod breakdown;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod error;
pub mod explorer;
pub mod gallery;
pub mod loader;
pub mod model;
pub mod narrative;
pub mod projects;
pub mod report;
pub mod scale;
pub mod selection;
pub mod stats;
pub mod tui;
pub mod util;

pub use aggregate::aggregate;
pub use cursor::{commits_up_to, TimeCursor};
pub use error::{LocvizError, Result};
pub use explorer::{ExplorerState, ExplorerView};
pub use loader::{load, load_path};
pub use model::{Commit, Row, Stats};
pub use selection::{is_inside, selected, selected_lines, PlotProjection, Region};
pub use stats::summarize;
