use crate::model::{Commit, Row, Stats};
use chrono::{DateTime, TimeZone, Timelike};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Coarse part of the day a change was made in, by local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Morning,
    Noon,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    pub fn of<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        match (at.hour(), at.minute()) {
            (6..=11, _) => DayPeriod::Morning,
            (12, 0) => DayPeriod::Noon,
            (12..=17, _) => DayPeriod::Afternoon,
            (18..=20, _) => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Noon => "noon",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
            DayPeriod::Night => "night",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// All rows belonging to the given commits.
pub fn rows_of<'a>(commits: &[&'a Commit]) -> Vec<&'a Arc<Row>> {
    commits.iter().flat_map(|c| c.lines().iter()).collect()
}

/// Aggregate figures over a set of rows and the commits they came from.
///
/// Maxima skip `NaN` inputs; the mean depth does not, so one unparseable depth
/// shows up as `NaN`. With no rows every figure is `None`.
pub fn summarize(rows: &[&Arc<Row>], commits: &[&Commit]) -> Stats {
    let files: HashSet<&str> = rows.iter().map(|r| r.file.as_str()).collect();

    let average_depth = if rows.is_empty() {
        None
    } else {
        Some(rows.iter().map(|r| r.depth).sum::<f64>() / rows.len() as f64)
    };

    Stats {
        total_lines: rows.len(),
        commits: commits.len(),
        files: files.len(),
        max_line: max_of(rows.iter().map(|r| r.line)),
        longest_line: max_of(rows.iter().map(|r| r.length)),
        max_depth: max_of(rows.iter().map(|r| r.depth)),
        average_depth,
        max_lines_per_commit: commits.iter().map(|c| c.total_lines).max(),
        busiest_period: busiest_period(rows).map(|p| p.label().to_string()),
    }
}

fn max_of<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    values.filter(|v| !v.is_nan()).fold(None, |acc, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
}

/// Period with the most rows; ties go to whichever period showed up first.
pub fn busiest_period(rows: &[&Arc<Row>]) -> Option<DayPeriod> {
    let mut order: Vec<DayPeriod> = Vec::new();
    let mut counts: HashMap<DayPeriod, usize> = HashMap::new();
    for row in rows {
        let period = DayPeriod::of(&row.datetime);
        let count = counts.entry(period).or_insert_with(|| {
            order.push(period);
            0
        });
        *count += 1;
    }

    let mut best: Option<(DayPeriod, usize)> = None;
    for period in order {
        let count = counts.get(&period).copied().unwrap_or(0);
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((period, count));
        }
    }
    best.map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn at(s: &str) -> DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn day_periods() {
        assert_eq!(DayPeriod::of(&at("2024-01-01T05:59:00+00:00")), DayPeriod::Night);
        assert_eq!(DayPeriod::of(&at("2024-01-01T06:00:00+00:00")), DayPeriod::Morning);
        assert_eq!(DayPeriod::of(&at("2024-01-01T12:00:30+00:00")), DayPeriod::Noon);
        assert_eq!(DayPeriod::of(&at("2024-01-01T12:01:00+00:00")), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::of(&at("2024-01-01T18:00:00+00:00")), DayPeriod::Evening);
        assert_eq!(DayPeriod::of(&at("2024-01-01T21:00:00+00:00")), DayPeriod::Night);
    }

    #[test]
    fn period_uses_local_offset() {
        // 03:00 UTC is evening in UTC-08:00.
        assert_eq!(DayPeriod::of(&at("2024-01-01T19:00:00-08:00")), DayPeriod::Evening);
    }

    #[test]
    fn max_skips_nan() {
        assert_eq!(max_of([1.0, f64::NAN, 3.0].into_iter()), Some(3.0));
        assert_eq!(max_of([f64::NAN].into_iter()), None);
        assert_eq!(max_of(std::iter::empty()), None);
    }

    #[test]
    fn empty_input_is_unknown() {
        let stats = summarize(&[], &[]);
        assert_eq!(stats.total_lines, 0);
        assert_eq!(stats.commits, 0);
        assert_eq!(stats.files, 0);
        assert!(stats.max_line.is_none());
        assert!(stats.longest_line.is_none());
        assert!(stats.max_depth.is_none());
        assert!(stats.average_depth.is_none());
        assert!(stats.max_lines_per_commit.is_none());
        assert!(stats.busiest_period.is_none());
    }

    const HEADER: &str = "file,line,type,commit,author,date,time,timezone,datetime,depth,length\n";

    fn rows(lines: &[(&str, &str, &str)]) -> Vec<Arc<Row>> {
        let mut csv = HEADER.to_string();
        for (commit, datetime, depth) in lines {
            let (date, rest) = datetime.split_once('T').unwrap();
            csv += &format!(
                "a.rs,1,rs,{commit},Ana,{date},{},{},{datetime},{depth},10\n",
                &rest[..8],
                &rest[8..]
            );
        }
        crate::loader::load(csv.as_bytes()).unwrap()
    }

    #[test]
    fn busiest_period_ties_go_to_first_seen() {
        let night_first = rows(&[
            ("c1", "2024-01-01T23:00:00+00:00", "1"),
            ("c2", "2024-01-02T09:00:00+00:00", "1"),
        ]);
        let refs: Vec<&Arc<Row>> = night_first.iter().collect();
        assert_eq!(busiest_period(&refs), Some(DayPeriod::Night));

        let morning_first: Vec<&Arc<Row>> = night_first.iter().rev().collect();
        assert_eq!(busiest_period(&morning_first), Some(DayPeriod::Morning));
    }

    #[test]
    fn busiest_period_counts_rows() {
        let data = rows(&[
            ("c1", "2024-01-01T23:00:00+00:00", "1"),
            ("c2", "2024-01-02T19:00:00+00:00", "1"),
            ("c2", "2024-01-02T19:00:00+00:00", "1"),
        ]);
        let refs: Vec<&Arc<Row>> = data.iter().collect();
        assert_eq!(summarize(&refs, &[]).busiest_period.as_deref(), Some("evening"));
    }

    #[test]
    fn nan_depth_reaches_the_mean_but_not_the_max() {
        let data = rows(&[
            ("c1", "2024-01-01T10:00:00+00:00", "2"),
            ("c1", "2024-01-01T10:00:00+00:00", "deep"),
            ("c1", "2024-01-01T10:00:00+00:00", "5"),
        ]);
        let refs: Vec<&Arc<Row>> = data.iter().collect();
        let stats = summarize(&refs, &[]);
        assert!(stats.average_depth.unwrap().is_nan());
        assert_eq!(stats.max_depth, Some(5.0));
    }

    #[test]
    fn filtered_commits_account_for_their_rows() {
        let data = rows(&[
            ("c1", "2024-01-01T10:00:00+00:00", "1"),
            ("c1", "2024-01-01T10:00:00+00:00", "2"),
            ("c2", "2024-01-05T10:00:00+00:00", "3"),
            ("c3", "2024-01-09T10:00:00+00:00", "4"),
            ("c3", "2024-01-09T10:00:00+00:00", "4"),
        ]);
        let commits = crate::aggregate::aggregate(&data, None);
        let cursor = crate::cursor::TimeCursor::fit(&commits).with_progress(50.0);
        let filtered = cursor.filtered(&commits);
        assert_eq!(filtered.len(), 2);

        let stats = summarize(&rows_of(&filtered), &filtered);
        let sum: usize = filtered.iter().map(|c| c.total_lines).sum();
        assert_eq!(stats.total_lines, sum);
        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.commits, 2);
        assert_eq!(stats.max_lines_per_commit, Some(2));
    }
}
