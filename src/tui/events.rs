use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::input::{begin_brush, copy_step_commit, enter_step, handle_brush_input, move_step};
use super::state::{TimelineData, TuiState, ViewMode, TAB_TITLES};

const FINE_STEP: f64 = 1.0;
const COARSE_STEP: f64 = 10.0;

/// Handle a keyboard event, mutating TUI state and returning `true` if the loop should exit.
pub fn handle_key_events(key_event: KeyEvent, state: &mut TuiState, data: &TimelineData) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1)) {
            state.show_help = false;
        }
        return false;
    }

    if state.brush.is_some() {
        handle_brush_input(key_event.code, key_event.modifiers, state, data);
        return false;
    }

    let coarse = key_event.modifiers.contains(KeyModifiers::SHIFT);
    let tabs = TAB_TITLES.len();

    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Tab => {
            state.tab_index = (state.tab_index + 1) % tabs;
            state.sync_view_mode();
        }
        KeyCode::BackTab => {
            state.tab_index = (state.tab_index + tabs - 1) % tabs;
            state.sync_view_mode();
        }
        KeyCode::Left => state
            .explorer
            .cursor
            .nudge(if coarse { -COARSE_STEP } else { -FINE_STEP }),
        KeyCode::Right => state
            .explorer
            .cursor
            .nudge(if coarse { COARSE_STEP } else { FINE_STEP }),
        KeyCode::PageDown => state.explorer.cursor.nudge(-COARSE_STEP),
        KeyCode::PageUp => state.explorer.cursor.nudge(COARSE_STEP),
        KeyCode::Home => state.explorer.cursor.set_progress(0.0),
        KeyCode::End => state.explorer.cursor.set_progress(100.0),
        KeyCode::Char('b') => begin_brush(state, data),
        KeyCode::Esc => state.explorer = state.explorer.with_selection(None),
        KeyCode::Char('y') => copy_step_commit(state, data),
        KeyCode::Up | KeyCode::Char('k') if state.view_mode == ViewMode::Story => {
            move_step(state, data, -1)
        }
        KeyCode::Down | KeyCode::Char('j') if state.view_mode == ViewMode::Story => {
            move_step(state, data, 1)
        }
        KeyCode::Char('g') if state.view_mode == ViewMode::Story => enter_step(state, data, 0),
        KeyCode::Char('G') if state.view_mode == ViewMode::Story => {
            enter_step(state, data, data.steps.len().saturating_sub(1))
        }
        _ => {}
    }

    false
}
