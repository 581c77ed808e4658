use crate::model::Commit;
use crate::scale::{extent, TimeScale};
use chrono::{DateTime, TimeZone, Utc};

pub const MIN_PROGRESS: f64 = 0.0;
pub const MAX_PROGRESS: f64 = 100.0;

/// A 0–100 slider over the span of commit times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeCursor {
    progress: f64,
    scale: Option<TimeScale>,
}

impl TimeCursor {
    /// Fit the cursor to the earliest and latest commit. An empty set leaves
    /// the cursor without a scale and every cutoff query returns nothing.
    pub fn fit(commits: &[Commit]) -> Self {
        let scale = extent(commits.iter().map(|c| c.datetime.timestamp_millis()))
            .and_then(|(lo, hi)| {
                let lo = Utc.timestamp_millis_opt(lo).single()?;
                let hi = Utc.timestamp_millis_opt(hi).single()?;
                Some(TimeScale::new(&lo, &hi, (MIN_PROGRESS, MAX_PROGRESS)))
            });
        Self {
            progress: MAX_PROGRESS,
            scale,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn scale(&self) -> Option<&TimeScale> {
        self.scale.as_ref()
    }

    /// Out-of-range values are clamped; `NaN` leaves the cursor where it is.
    pub fn set_progress(&mut self, progress: f64) {
        if progress.is_nan() {
            return;
        }
        self.progress = progress.clamp(MIN_PROGRESS, MAX_PROGRESS);
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.set_progress(progress);
        self
    }

    pub fn nudge(&mut self, delta: f64) {
        self.set_progress(self.progress + delta);
    }

    /// The timestamp the current progress maps to.
    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.scale.map(|s| s.invert(self.progress))
    }

    pub fn progress_of<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> Option<f64> {
        self.scale
            .map(|s| s.scale(at).clamp(MIN_PROGRESS, MAX_PROGRESS))
    }

    /// Commits at or before the current cutoff, in their original order.
    pub fn filtered<'a>(&self, commits: &'a [Commit]) -> Vec<&'a Commit> {
        match self.cutoff() {
            Some(cutoff) => commits_up_to(commits, &cutoff),
            None => Vec::new(),
        }
    }
}

/// Commits with a timestamp at or before `cutoff`, order preserved.
pub fn commits_up_to<'a, Tz: TimeZone>(commits: &'a [Commit], cutoff: &DateTime<Tz>) -> Vec<&'a Commit> {
    let cutoff_ms = cutoff.timestamp_millis();
    commits
        .iter()
        .filter(|c| c.datetime.timestamp_millis() <= cutoff_ms)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::loader::parse_timestamp;
    use crate::model::Row;
    use std::sync::Arc;

    fn commits(times: &[(&str, &str)]) -> Vec<Commit> {
        let rows: Vec<Arc<Row>> = times
            .iter()
            .map(|(id, at)| {
                let datetime = parse_timestamp(at).unwrap();
                Arc::new(Row {
                    commit: id.to_string(),
                    file: "a.rs".to_string(),
                    line: 1.0,
                    depth: 0.0,
                    length: 1.0,
                    kind: "rs".to_string(),
                    author: "Ana".to_string(),
                    date: datetime,
                    time: String::new(),
                    timezone: String::new(),
                    datetime,
                })
            })
            .collect();
        aggregate(&rows, None)
    }

    fn ids(commits: &[&Commit]) -> Vec<String> {
        commits.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn default_progress_includes_everything() {
        let cs = commits(&[
            ("b", "2024-01-05T00:00:00Z"),
            ("a", "2024-01-01T00:00:00Z"),
            ("c", "2024-01-05T00:00:00Z"),
        ]);
        let cursor = TimeCursor::fit(&cs);
        assert_eq!(cursor.progress(), 100.0);
        assert_eq!(ids(&cursor.filtered(&cs)), ["b", "a", "c"]);
    }

    #[test]
    fn zero_progress_keeps_only_earliest() {
        let cs = commits(&[
            ("a", "2024-01-01T00:00:00Z"),
            ("b", "2024-01-01T00:00:00Z"),
            ("c", "2024-01-02T00:00:00Z"),
        ]);
        let cursor = TimeCursor::fit(&cs).with_progress(0.0);
        assert_eq!(cursor.cutoff().unwrap().to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(ids(&cursor.filtered(&cs)), ["a", "b"]);
    }

    #[test]
    fn empty_set_has_no_cutoff() {
        let cursor = TimeCursor::fit(&[]).with_progress(42.0);
        assert!(cursor.cutoff().is_none());
        assert!(cursor.filtered(&[]).is_empty());
    }

    #[test]
    fn single_timestamp_domain_inverts_to_it() {
        let cs = commits(&[("a", "2024-03-01T12:00:00Z")]);
        let cursor = TimeCursor::fit(&cs).with_progress(30.0);
        assert_eq!(cursor.cutoff().unwrap().to_rfc3339(), "2024-03-01T12:00:00+00:00");
        assert_eq!(cursor.filtered(&cs).len(), 1);
    }

    #[test]
    fn progress_is_clamped() {
        let mut cursor = TimeCursor::fit(&[]);
        cursor.set_progress(150.0);
        assert_eq!(cursor.progress(), 100.0);
        cursor.nudge(-500.0);
        assert_eq!(cursor.progress(), 0.0);
        cursor.set_progress(f64::NAN);
        assert_eq!(cursor.progress(), 0.0);
    }

    #[test]
    fn progress_of_round_trips_cutoff() {
        let cs = commits(&[("a", "2024-01-01T00:00:00Z"), ("b", "2024-01-11T00:00:00Z")]);
        let cursor = TimeCursor::fit(&cs);
        let p = cursor.progress_of(&cs[1].datetime).unwrap();
        assert_eq!(p, 100.0);
        assert_eq!(cursor.progress_of(&cs[0].datetime), Some(0.0));
    }
}
