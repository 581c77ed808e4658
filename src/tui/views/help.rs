use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing navigation, views, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "locviz - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Time:"),
        Line::from("  ←/→         Move the cursor by 1%"),
        Line::from("  Shift+←/→   Move the cursor by 10%"),
        Line::from("  PgUp/PgDn   Move the cursor by 10%"),
        Line::from("  Home/End    Jump to the first/last commit"),
        Line::from(""),
        section("Selection:"),
        Line::from("  b           Start a brush on the plot"),
        Line::from("  arrows/hjkl Move the crosshair (Shift for bigger steps)"),
        Line::from("  Space/Enter Anchor, then finish the rectangle"),
        Line::from("  Esc         Clear the selection"),
        Line::from(""),
        section("Views:"),
        Line::from("  Tab         Next view (Scatter/Files/Story)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from(""),
        section("Story:"),
        Line::from("  j/k or ↑/↓  Previous/next step"),
        Line::from("  g/G         First/last step"),
        Line::from("  y           Copy the commit link"),
        Line::from(""),
        section("General:"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
