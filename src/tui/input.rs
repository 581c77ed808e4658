use crossterm::event::{KeyCode, KeyModifiers};

use crate::narrative::step_entered;

use super::state::{Brush, TimelineData, TuiState};

/// Fraction of the plot a crosshair step covers.
const BRUSH_STEP: f64 = 0.02;

pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

/// Start a brush gesture with the crosshair in the middle of the plot.
pub fn begin_brush(state: &mut TuiState, data: &TimelineData) {
    let plot = data.projection.plot;
    state.brush = Some(Brush {
        anchor: None,
        crosshair: (plot.width / 2.0, plot.height / 2.0),
    });
    state.set_status("Brush: arrows move, space anchors, space again finishes");
}

/// Keystrokes while a brush gesture is active. The selection follows the
/// crosshair once anchored.
pub fn handle_brush_input(code: KeyCode, modifiers: KeyModifiers, state: &mut TuiState, data: &TimelineData) {
    let Some(mut brush) = state.brush else {
        return;
    };
    let plot = data.projection.plot;
    let scale = if modifiers.contains(KeyModifiers::SHIFT) { 5.0 } else { 1.0 };
    let dx = plot.width * BRUSH_STEP * scale;
    let dy = plot.height * BRUSH_STEP * scale;

    match code {
        KeyCode::Esc => {
            state.brush = None;
            state.explorer = state.explorer.with_selection(None);
            return;
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if brush.anchor.is_none() {
                brush.anchor = Some(brush.crosshair);
            } else {
                state.explorer = state.explorer.with_selection(brush.region());
                state.brush = None;
                return;
            }
        }
        KeyCode::Left | KeyCode::Char('h') => brush.crosshair.0 -= dx,
        KeyCode::Right | KeyCode::Char('l') => brush.crosshair.0 += dx,
        KeyCode::Up | KeyCode::Char('k') => brush.crosshair.1 -= dy,
        KeyCode::Down | KeyCode::Char('j') => brush.crosshair.1 += dy,
        _ => {}
    }

    brush.crosshair.0 = brush.crosshair.0.clamp(0.0, plot.width);
    brush.crosshair.1 = brush.crosshair.1.clamp(0.0, plot.height);
    state.brush = Some(brush);
    if brush.anchor.is_some() {
        state.explorer = state.explorer.with_selection(brush.region());
    }
}

pub fn move_step(state: &mut TuiState, data: &TimelineData, delta: isize) {
    if data.steps.is_empty() {
        return;
    }
    let last = data.steps.len() - 1;
    let next = if delta < 0 {
        state.step.saturating_sub(delta.unsigned_abs())
    } else {
        (state.step + delta as usize).min(last)
    };
    enter_step(state, data, next);
}

pub fn enter_step(state: &mut TuiState, data: &TimelineData, index: usize) {
    if let Some(step) = data.steps.get(index) {
        state.step = index;
        state.explorer = step_entered(state.explorer, step);
    }
}

/// Copy the link (or id) of the commit behind the current story step.
pub fn copy_step_commit(state: &mut TuiState, data: &TimelineData) {
    let Some(commit) = data.step_commit(state.step) else {
        return;
    };
    let text = commit.url.clone().unwrap_or_else(|| commit.id.clone());
    match copy_to_clipboard(&text) {
        Ok(_) => state.set_status(format!("Copied: {}", commit.short_id())),
        Err(err) => state.set_status(format!("Clipboard error: {err}")),
    }
}
