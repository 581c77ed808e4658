use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

pub const SCHEMA_VERSION: u32 = 1;

/// One line-level change event from the source log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub commit: String,
    pub file: String,
    pub line: f64,
    pub depth: f64,
    pub length: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub author: String,
    /// Local midnight of the commit day, in the commit's own offset.
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
}

/// All rows sharing one commit id.
///
/// The constituent rows are reachable through [`Commit::lines`] only; they are
/// not serialized and do not show up in `Debug` output.
#[derive(Clone, Serialize)]
pub struct Commit {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    lines: Vec<Arc<Row>>,
}

impl Commit {
    pub(crate) fn from_group(id: String, lines: Vec<Arc<Row>>, url_base: Option<&str>) -> Option<Self> {
        let first = lines.first()?.clone();
        let url = url_base.map(|base| format!("{base}{id}"));
        let hour_frac = crate::util::hour_frac(&first.datetime);

        Some(Self {
            id,
            url,
            author: first.author.clone(),
            date: first.date,
            time: first.time.clone(),
            timezone: first.timezone.clone(),
            datetime: first.datetime,
            hour_frac,
            total_lines: lines.len(),
            lines,
        })
    }

    pub fn lines(&self) -> &[Arc<Row>] {
        &self.lines
    }

    pub fn short_id(&self) -> String {
        self.id.chars().take(8).collect()
    }

    /// Distinct files touched by this commit.
    pub fn file_count(&self) -> usize {
        self.lines
            .iter()
            .map(|row| row.file.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl fmt::Debug for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commit")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("author", &self.author)
            .field("date", &self.date)
            .field("time", &self.time)
            .field("timezone", &self.timezone)
            .field("datetime", &self.datetime)
            .field("hour_frac", &self.hour_frac)
            .field("total_lines", &self.total_lines)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total_lines: usize,
    pub commits: usize,
    pub files: usize,
    #[serde(with = "figure", default)]
    pub max_line: Option<f64>,
    #[serde(with = "figure", default)]
    pub longest_line: Option<f64>,
    #[serde(with = "figure", default)]
    pub max_depth: Option<f64>,
    #[serde(with = "figure", default)]
    pub average_depth: Option<f64>,
    pub max_lines_per_commit: Option<usize>,
    pub busiest_period: Option<String>,
}

/// Optional figures in JSON. `None` is `null`; non-finite values are written
/// as the strings `"NaN"`, `"Infinity"` and `"-Infinity"` so they stay
/// distinct from a missing figure.
mod figure {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> std::result::Result<S::Ok, S::Error> {
        match *value {
            None => s.serialize_none(),
            Some(v) if v.is_nan() => s.serialize_str("NaN"),
            Some(v) if v == f64::INFINITY => s.serialize_str("Infinity"),
            Some(v) if v == f64::NEG_INFINITY => s.serialize_str("-Infinity"),
            Some(v) => s.serialize_f64(v),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<f64>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Figure {
            Number(f64),
            Text(String),
        }
        Ok(Option::<Figure>::deserialize(d)?.map(|f| match f {
            Figure::Number(v) => v,
            Figure::Text(t) => crate::util::parse_number(&t),
        }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageShare {
    #[serde(rename = "type")]
    pub kind: String,
    pub lines: usize,
    pub proportion: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    pub file: String,
    pub lines: usize,
    pub types: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub commit_id: String,
    pub progress: f64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub progress: f64,
    pub cutoff: Option<DateTime<Utc>>,
    pub stats: Stats,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub progress: f64,
    pub cutoff: Option<DateTime<Utc>>,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub progress: f64,
    pub region: crate::selection::Region,
    pub label: String,
    pub commits: Vec<Commit>,
    pub breakdown: Vec<LanguageShare>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub progress: f64,
    pub files: Vec<FileSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub steps: Vec<Step>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nan_figures_differ_from_unknown_ones() {
        let stats = Stats {
            total_lines: 1,
            commits: 1,
            files: 1,
            max_line: Some(12.0),
            average_depth: Some(f64::NAN),
            longest_line: Some(f64::INFINITY),
            ..Stats::default()
        };
        let v = serde_json::to_value(&stats).unwrap();
        assert_eq!(v["average_depth"], json!("NaN"));
        assert_eq!(v["longest_line"], json!("Infinity"));
        assert_eq!(v["max_line"], json!(12.0));
        assert_eq!(v["max_depth"], json!(null));

        let empty = serde_json::to_value(Stats::default()).unwrap();
        assert_eq!(empty["average_depth"], json!(null));
    }

    #[test]
    fn figures_read_back() {
        let text = r#"{"total_lines":1,"commits":1,"files":1,"max_line":3.5,
            "average_depth":"NaN","max_lines_per_commit":1,"busiest_period":"night"}"#;
        let stats: Stats = serde_json::from_str(text).unwrap();
        assert_eq!(stats.max_line, Some(3.5));
        assert!(stats.average_depth.is_some_and(f64::is_nan));
        assert_eq!(stats.max_depth, None);
        assert_eq!(stats.longest_line, None);
    }

    #[test]
    fn file_count_ignores_repeats() {
        let csv = "file,line,type,commit,author,date,time,timezone,datetime,depth,length\n\
                   a.rs,1,rs,c1,Ana,2024-01-01,10:00:00,+00:00,2024-01-01T10:00:00+00:00,1,10\n\
                   b.rs,1,rs,c1,Ana,2024-01-01,10:00:00,+00:00,2024-01-01T10:00:00+00:00,1,10\n\
                   a.rs,2,rs,c1,Ana,2024-01-01,10:00:00,+00:00,2024-01-01T10:00:00+00:00,1,10\n";
        let rows = crate::loader::load(csv.as_bytes()).unwrap();
        let commits = crate::aggregate::aggregate(&rows, None);
        assert_eq!(commits[0].total_lines, 3);
        assert_eq!(commits[0].file_count(), 2);
    }
}
