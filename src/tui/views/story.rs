use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::explorer::ExplorerView;
use crate::tui::draw::{heading_style, label_style};
use crate::tui::layout::scroll_offset;
use crate::tui::state::{TimelineData, TuiState};
use crate::util::display_figure;

/// Scrolling narration: one entry per commit, the current one expanded on the right.
pub fn draw_story_view(f: &mut Frame, area: Rect, data: &TimelineData, view: &ExplorerView, state: &TuiState) {
    if data.steps.is_empty() {
        let placeholder = Paragraph::new("No commits to tell a story about")
            .block(Block::default().title("Story").borders(Borders::ALL));
        f.render_widget(placeholder, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let visible = chunks[0].height.saturating_sub(2) as usize;
    let offset = scroll_offset(state.step, data.steps.len(), visible);

    let items: Vec<ListItem> = data
        .steps
        .iter()
        .skip(offset)
        .take(visible.max(1))
        .map(|step| {
            let commit = data.commits.iter().find(|c| c.id == step.commit_id);
            let when = commit
                .map(|c| c.datetime.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            let short = commit
                .map(|c| c.short_id())
                .unwrap_or_else(|| step.commit_id.clone());
            let style = if step.index == state.step {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3}. ", step.index + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{when}  {short}")),
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!("Story ({}/{})", state.step + 1, data.steps.len()))
            .borders(Borders::ALL),
    );
    f.render_widget(list, chunks[0]);

    let Some(step) = data.steps.get(state.step) else {
        return;
    };

    let mut text = vec![
        Line::from(Span::styled(step.text.clone(), label_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Cursor: ", heading_style()),
            Span::raw(format!("{:.0}%", step.progress)),
        ]),
        Line::from(vec![
            Span::styled("Lines so far: ", heading_style()),
            Span::raw(view.stats.total_lines.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Deepest nesting so far: ", heading_style()),
            Span::raw(display_figure(view.stats.max_depth, 0)),
        ]),
    ];
    if let Some(url) = data.step_commit(state.step).and_then(|c| c.url.as_deref()) {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            url.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        )));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "j/k move · g/G first/last · y copy link",
        Style::default().fg(Color::Gray),
    )));

    let para = Paragraph::new(text)
        .block(Block::default().title("Step").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(para, chunks[1]);
}
