use crate::config::PlotConfig;
use crate::error::{LocvizError, Result};
use crate::model::{Commit, LanguageShare, Row};
use crate::scale::{extent, LinearScale, SqrtScale, TimeScale};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Axis-aligned rectangle in plot coordinates. Corners are normalised so
/// `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Region {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Parse `"x0,y0,x1,y1"`.
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f64>()
                    .map_err(|_| LocvizError::InvalidRegion(format!("not a number: {p:?}")))
            })
            .collect::<Result<_>>()?;

        match parts.as_slice() {
            [x0, y0, x1, y1] if parts.iter().all(|v| v.is_finite()) => {
                Ok(Self::new(*x0, *y0, *x1, *y1))
            }
            [_, _, _, _] => Err(LocvizError::InvalidRegion(format!(
                "coordinates must be finite: {s}"
            ))),
            _ => Err(LocvizError::InvalidRegion(format!(
                "expected x0,y0,x1,y1 but got {} values",
                parts.len()
            ))),
        }
    }

    /// Closed containment: points on the border count as inside.
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }
}

/// `None` means no selection, which selects nothing.
pub fn is_inside(region: Option<&Region>, point: (f64, f64)) -> bool {
    region.is_some_and(|r| r.contains(point))
}

/// Scales that place commits on the scatter plot: time across, hour of day
/// down, dot radius by commit size.
#[derive(Debug, Clone, Copy)]
pub struct PlotProjection {
    pub x: Option<TimeScale>,
    pub y: LinearScale,
    pub r: Option<SqrtScale>,
    pub plot: PlotConfig,
}

impl PlotProjection {
    pub fn fit<'a, I>(commits: I, plot: &PlotConfig) -> Self
    where
        I: IntoIterator<Item = &'a Commit> + Clone,
    {
        let x = extent(commits.clone().into_iter().map(|c| c.datetime))
            .map(|(lo, hi)| TimeScale::new(&lo, &hi, (0.0, plot.width)).nice_days());
        let y = LinearScale::new((0.0, 24.0), (plot.height, 0.0));
        let r = extent(commits.into_iter().map(|c| c.total_lines as f64))
            .map(|(lo, hi)| SqrtScale::new((lo, hi), (plot.radius_min, plot.radius_max)));

        Self { x, y, r, plot: *plot }
    }

    /// Position of a commit in plot coordinates. Without a fitted time axis
    /// the commit lands at the left edge.
    pub fn project(&self, commit: &Commit) -> (f64, f64) {
        let x = self.x.map(|s| s.scale(&commit.datetime)).unwrap_or(0.0);
        (x, self.y.scale(commit.hour_frac))
    }

    pub fn radius(&self, commit: &Commit) -> f64 {
        self.r
            .map(|s| s.scale(commit.total_lines as f64))
            .unwrap_or(self.plot.radius_min)
    }
}

/// Commits whose projected point falls inside the region, order preserved.
pub fn selected<'a, I>(region: Option<&Region>, commits: I, projection: &PlotProjection) -> Vec<&'a Commit>
where
    I: IntoIterator<Item = &'a Commit>,
{
    if region.is_none() {
        return Vec::new();
    }
    commits
        .into_iter()
        .filter(|c| is_inside(region, projection.project(c)))
        .collect()
}

/// Rows of already-selected commits. No spatial test is made per row.
pub fn selected_lines<'a>(commits: &[&'a Commit]) -> Vec<&'a Arc<Row>> {
    crate::stats::rows_of(commits)
}

/// Row counts per change type, in first-seen order.
pub fn language_breakdown(lines: &[&Arc<Row>]) -> Vec<LanguageShare> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in lines {
        let count = counts.entry(row.kind.as_str()).or_insert_with(|| {
            order.push(row.kind.as_str());
            0
        });
        *count += 1;
    }

    let total = lines.len() as f64;
    order
        .into_iter()
        .map(|kind| {
            let lines = counts.get(kind).copied().unwrap_or(0);
            LanguageShare {
                kind: kind.to_string(),
                lines,
                proportion: lines as f64 / total,
            }
        })
        .collect()
}

pub fn selection_count_label(count: usize) -> String {
    if count == 0 {
        "No commits selected".to_string()
    } else {
        format!("{count} commits selected")
    }
}
