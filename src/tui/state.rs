use std::time::Instant;

use crate::explorer::ExplorerState;
use crate::model::{Commit, Step};
use crate::selection::{PlotProjection, Region};

/// Everything the timeline UI works from. Built once after loading.
pub struct TimelineData<'a> {
    pub commits: &'a [Commit],
    pub projection: PlotProjection,
    pub steps: Vec<Step>,
}

impl TimelineData<'_> {
    pub fn step_commit(&self, step: usize) -> Option<&Commit> {
        let id = &self.steps.get(step)?.commit_id;
        self.commits.iter().find(|c| &c.id == id)
    }
}

/// A keyboard-driven rectangle gesture in plot coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub anchor: Option<(f64, f64)>,
    pub crosshair: (f64, f64),
}

impl Brush {
    pub fn region(&self) -> Option<Region> {
        self.anchor.map(|(ax, ay)| {
            let (cx, cy) = self.crosshair;
            Region::new(ax, ay, cx, cy)
        })
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ViewMode {
    Scatter,
    Files,
    Story,
}

pub const TAB_TITLES: [&str; 3] = ["Scatter", "Files", "Story"];

pub struct TuiState {
    pub explorer: ExplorerState,
    pub view_mode: ViewMode,
    pub tab_index: usize,
    pub show_help: bool,
    pub brush: Option<Brush>,
    pub step: usize,
    pub status_message: Option<(String, Instant)>,
}

impl TuiState {
    pub fn new(explorer: ExplorerState) -> Self {
        Self {
            explorer,
            view_mode: ViewMode::Scatter,
            tab_index: 0,
            show_help: false,
            brush: None,
            step: 0,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn sync_view_mode(&mut self) {
        self.view_mode = match self.tab_index {
            0 => ViewMode::Scatter,
            1 => ViewMode::Files,
            2 => ViewMode::Story,
            _ => ViewMode::Scatter,
        };
    }
}
