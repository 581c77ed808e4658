use crate::cursor::TimeCursor;
use crate::model::{Commit, LanguageShare, Stats};
use crate::selection::{language_breakdown, selected, selected_lines, PlotProjection, Region};
use crate::stats::{rows_of, summarize};
use log::trace;

/// Everything the interactive views can change. Handlers take the current
/// value and return the next one; nothing is shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerState {
    pub cursor: TimeCursor,
    pub selection: Option<Region>,
}

/// Derived data for one state, borrowed from the commit list.
#[derive(Debug, Clone)]
pub struct ExplorerView<'a> {
    /// Commits at or before the cursor.
    pub filtered: Vec<&'a Commit>,
    /// Subset of `filtered` inside the selection region.
    pub selected: Vec<&'a Commit>,
    pub stats: Stats,
    pub breakdown: Vec<LanguageShare>,
}

impl ExplorerState {
    pub fn new(commits: &[Commit]) -> Self {
        Self {
            cursor: TimeCursor::fit(commits),
            selection: None,
        }
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.cursor.set_progress(progress);
        self
    }

    /// A zero-area region ends the selection.
    pub fn with_selection(mut self, region: Option<Region>) -> Self {
        self.selection = region.filter(|r| !r.is_empty());
        self
    }

    pub fn recompute<'a>(&self, commits: &'a [Commit], projection: &PlotProjection) -> ExplorerView<'a> {
        let filtered = self.cursor.filtered(commits);
        let rows = rows_of(&filtered);
        let stats = summarize(&rows, &filtered);

        let selected = selected(self.selection.as_ref(), filtered.iter().copied(), projection);
        let breakdown = language_breakdown(&selected_lines(&selected));

        trace!(
            "progress {:.1}: {} commits in range, {} selected",
            self.cursor.progress(),
            filtered.len(),
            selected.len()
        );

        ExplorerView {
            filtered,
            selected,
            stats,
            breakdown,
        }
    }
}
