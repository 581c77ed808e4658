use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, error};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Terminal;

use crate::explorer::ExplorerState;
use crate::narrative::steps;
use crate::report::Dataset;
use crate::selection::PlotProjection;

use super::events::handle_key_events;
use super::state::{TimelineData, TuiState, ViewMode, TAB_TITLES};
use super::views::{draw_files_view, draw_help_overlay, draw_scatter_view, draw_story_view};

const STATUS_TTL: Duration = Duration::from_secs(3);

pub fn run(dataset: &Dataset, progress: f64) -> io::Result<()> {
    let explorer = ExplorerState::new(&dataset.commits).with_progress(progress);
    let data = TimelineData {
        commits: &dataset.commits,
        projection: PlotProjection::fit(&dataset.commits, &dataset.config.plot),
        steps: steps(&dataset.commits, &explorer.cursor),
    };
    let mut state = TuiState::new(explorer);
    debug!(
        "Starting timeline UI with {} commits and {} steps",
        data.commits.len(),
        data.steps.len()
    );

    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut state, &data);

    terminal.clear()?;
    disable_raw_mode()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut TuiState,
    data: &TimelineData,
) -> io::Result<()> {
    loop {
        if let Some((_, since)) = &state.status_message {
            if since.elapsed() > STATUS_TTL {
                state.status_message = None;
            }
        }

        let view = state.explorer.recompute(data.commits, &data.projection);

        let draw_result = terminal.draw(|f| {
            let size = f.size();

            if state.show_help {
                draw_help_overlay(f, size);
                return;
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(size);

            let tabs = Tabs::new(TAB_TITLES.to_vec())
                .block(Block::default().borders(Borders::ALL).title("View Mode"))
                .highlight_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .select(state.tab_index);
            f.render_widget(tabs, chunks[0]);

            match state.view_mode {
                ViewMode::Scatter => draw_scatter_view(f, chunks[1], data, &view, state),
                ViewMode::Files => draw_files_view(f, chunks[1], &view, state),
                ViewMode::Story => draw_story_view(f, chunks[1], data, &view, state),
            }
        });

        if let Err(e) = draw_result {
            error!("TUI draw error: {e}");
        }

        if poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if handle_key_events(key_event, state, data) {
                    break;
                }
            }
        }
    }
    Ok(())
}
