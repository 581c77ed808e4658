pub mod exec;
pub mod fetch;
pub mod output;

pub use exec::{exec_commits, exec_files, exec_select, exec_stats, exec_story, exec_timeline};
pub use fetch::{load_dataset, Dataset};
