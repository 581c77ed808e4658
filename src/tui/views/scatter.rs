use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Rectangle};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::explorer::ExplorerView;
use crate::model::Commit;
use crate::selection::{selection_count_label, Region};
use crate::tui::draw::{heading_style, intensity_color, label_style, SELECTED_COLOR};
use crate::tui::state::{TimelineData, TuiState};
use crate::util::display_figure;

/// Commit scatter plot (time across, hour of day up) with the time slider
/// above and summary figures beside it.
pub fn draw_scatter_view(f: &mut Frame, area: Rect, data: &TimelineData, view: &ExplorerView, state: &TuiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    draw_slider(f, rows[0], state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[1]);

    draw_plot(f, columns[0], data, view, state);
    draw_summary(f, columns[1], view);

    let status = match &state.status_message {
        Some((msg, _)) => msg.clone(),
        None => selection_count_label(view.selected.len()),
    };
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::Gray)),
        rows[2],
    );
}

fn draw_slider(f: &mut Frame, area: Rect, state: &TuiState) {
    let progress = state.explorer.cursor.progress();
    let label = match state.explorer.cursor.cutoff() {
        Some(cutoff) => format!("{progress:.0}% · up to {}", cutoff.format("%b %-d, %Y %H:%M")),
        None => "no commits".to_string(),
    };
    let gauge = Gauge::default()
        .block(Block::default().title("Time (←/→)").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_plot(f: &mut Frame, area: Rect, data: &TimelineData, view: &ExplorerView, state: &TuiState) {
    let projection = &data.projection;
    let plot = projection.plot;
    let flip = |y: f64| plot.height - y;
    let (x_bounds, y_bounds) = plot.outer_bounds();

    // Larger dots first so smaller ones stay visible on top.
    let mut dots: Vec<&Commit> = view.filtered.clone();
    dots.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));
    let max_lines = dots.first().map(|c| c.total_lines).unwrap_or(0);

    let is_selected = |c: &Commit| view.selected.iter().any(|s| std::ptr::eq(*s, c));
    let region: Option<Region> = state.brush.and_then(|b| b.region()).or(state.explorer.selection);
    let crosshair = state.brush.map(|b| b.crosshair);

    let x_labels = projection.x.map(|x| {
        let (lo, hi) = x.domain();
        (lo.format("%b %d").to_string(), hi.format("%b %d").to_string())
    });

    let canvas = Canvas::default()
        .block(Block::default().title("Commits by time of day").borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            for hour in [0u32, 6, 12, 18, 24] {
                let y = flip(projection.y.scale(f64::from(hour)));
                ctx.print(x_bounds[0], y, Span::styled(format!("{hour:02}:00"), Style::default().fg(Color::DarkGray)));
            }
            if let Some((lo, hi)) = &x_labels {
                let below = y_bounds[0] / 2.0;
                ctx.print(0.0, below, Span::styled(lo.clone(), Style::default().fg(Color::DarkGray)));
                ctx.print(plot.width * 0.9, below, Span::styled(hi.clone(), Style::default().fg(Color::DarkGray)));
            }
            ctx.layer();

            for &commit in &dots {
                let (x, y) = projection.project(commit);
                let color = if is_selected(commit) {
                    SELECTED_COLOR
                } else {
                    intensity_color(commit.total_lines, max_lines)
                };
                ctx.draw(&Circle {
                    x,
                    y: flip(y),
                    radius: projection.radius(commit),
                    color,
                });
            }

            if let Some(r) = region {
                ctx.draw(&Rectangle {
                    x: r.x0,
                    y: flip(r.y1),
                    width: r.x1 - r.x0,
                    height: r.y1 - r.y0,
                    color: Color::Yellow,
                });
            }
            if let Some((x, y)) = crosshair {
                ctx.print(x, flip(y), Span::styled("+", Style::default().fg(Color::Yellow)));
            }
        });
    f.render_widget(canvas, area);
}

fn draw_summary(f: &mut Frame, area: Rect, view: &ExplorerView) {
    let stats = &view.stats;
    let figure = |label: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{label}: "), label_style()),
            Span::styled(value, Style::default().fg(color)),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled("Summary", heading_style())),
        Line::from(""),
        figure("Total LOC", stats.total_lines.to_string(), Color::Cyan),
        figure("Commits", stats.commits.to_string(), Color::Cyan),
        figure("Files", stats.files.to_string(), Color::Cyan),
        figure("Max file length", display_figure(stats.max_line, 0), Color::Green),
        figure("Longest line", display_figure(stats.longest_line, 0), Color::Green),
        figure("Max depth", display_figure(stats.max_depth, 0), Color::Green),
        figure("Average depth", display_figure(stats.average_depth, 2), Color::Yellow),
        figure(
            "Largest commit",
            stats
                .max_lines_per_commit
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            Color::Yellow,
        ),
        figure(
            "Most active",
            stats.busiest_period.clone().unwrap_or_else(|| "unknown".to_string()),
            Color::Magenta,
        ),
    ];

    if !view.breakdown.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Selection", heading_style())));
        for share in &view.breakdown {
            lines.push(figure(
                &share.kind,
                format!("{} lines ({})", share.lines, crate::util::format_percent(share.proportion)),
                SELECTED_COLOR,
            ));
        }
    }

    let para = Paragraph::new(lines).block(Block::default().title("Statistics").borders(Borders::ALL));
    f.render_widget(para, area);
}
