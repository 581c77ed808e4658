use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::breakdown::file_breakdown;
use crate::explorer::ExplorerView;
use crate::tui::draw::{intensity_bar, SELECTED_COLOR};
use crate::tui::state::TuiState;
use crate::util::format_percent;

use super::header_cell;

const BAR_WIDTH: usize = 16;

/// Lines per file up to the cursor, and the change types in the current selection.
pub fn draw_files_view(f: &mut Frame, area: Rect, view: &ExplorerView, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let files = file_breakdown(&view.filtered);
    let max = files.first().map(|s| s.lines).unwrap_or(0);
    let visible = chunks[0].height.saturating_sub(3) as usize;

    let file_rows: Vec<Row> = files
        .iter()
        .take(visible.max(1))
        .map(|summary| {
            Row::new(vec![
                Cell::from(summary.file.clone()),
                Cell::from(format!("{}", summary.lines)),
                Cell::from(summary.dominant_type().unwrap_or("-").to_string()),
                Cell::from(intensity_bar(summary.lines, max, BAR_WIDTH))
                    .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let file_table = Table::new(
        file_rows,
        [
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(BAR_WIDTH as u16),
        ],
    )
    .header(Row::new([
        header_cell("File", Color::Yellow),
        header_cell("Lines", Color::Green),
        header_cell("Type", Color::Cyan),
        header_cell("", Color::Green),
    ]))
    .block(
        Block::default()
            .title(format!("Files ({} up to {:.0}%)", files.len(), state.explorer.cursor.progress()))
            .borders(Borders::ALL),
    );
    f.render_widget(file_table, chunks[0]);

    if view.breakdown.is_empty() {
        let placeholder = Paragraph::new("Press 'b' in the Scatter view to brush a selection").block(
            Block::default()
                .title("Selected Types")
                .borders(Borders::ALL),
        );
        f.render_widget(placeholder, chunks[1]);
        return;
    }

    let type_rows: Vec<Row> = view
        .breakdown
        .iter()
        .map(|share| {
            Row::new(vec![
                Cell::from(share.kind.clone()),
                Cell::from(format!("{}", share.lines)),
                Cell::from(format_percent(share.proportion)).style(Style::default().fg(SELECTED_COLOR)),
            ])
        })
        .collect();

    let type_table = Table::new(
        type_rows,
        [Constraint::Min(12), Constraint::Length(8), Constraint::Length(8)],
    )
    .header(Row::new([
        header_cell("Type", Color::Yellow),
        header_cell("Lines", Color::Green),
        header_cell("Share", Color::Magenta),
    ]))
    .block(
        Block::default()
            .title(format!("Selected Types ({} commits)", view.selected.len()))
            .borders(Borders::ALL),
    );
    f.render_widget(type_table, chunks[1]);
}
