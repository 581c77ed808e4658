use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod files;
mod help;
mod scatter;
mod story;

pub use files::draw_files_view;
pub use help::draw_help_overlay;
pub use scatter::draw_scatter_view;
pub use story::draw_story_view;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}
