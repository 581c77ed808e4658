use crate::error::{LocvizError, Result};
use crate::model::Row;
use crate::util::parse_number;
use chrono::{DateTime, FixedOffset};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

/// A source record before type conversion. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    commit: String,
    file: String,
    line: String,
    depth: String,
    length: String,
    #[serde(rename = "type")]
    kind: String,
    author: String,
    date: String,
    time: String,
    timezone: String,
    datetime: String,
}

/// Parse a per-line change log with a header row into typed rows.
///
/// Numeric fields that do not parse become `NaN` and the row is kept;
/// an unparseable timestamp aborts the whole load.
pub fn load<R: Read>(reader: R) -> Result<Vec<Arc<Row>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<RawRow>().enumerate() {
        let raw = record?;
        let record_no = index as u64 + 1;
        rows.push(Arc::new(convert(raw, record_no)?));
    }

    info!("Loaded {} rows", rows.len());
    Ok(rows)
}

/// Load rows from a file path, or from stdin when the path is `-`.
pub fn load_path(path: &Path) -> Result<Vec<Arc<Row>>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Loading {}...", path.display()));

    let result = if path == Path::new("-") {
        debug!("Reading rows from stdin");
        load(io::stdin().lock())
    } else {
        debug!("Reading rows from {}", path.display());
        File::open(path)
            .map_err(LocvizError::from)
            .and_then(|file| load(BufReader::new(file)))
    };

    pb.finish_and_clear();
    result
}

fn convert(raw: RawRow, record: u64) -> Result<Row> {
    let date = parse_local_midnight(&raw.date, &raw.timezone)
        .ok_or_else(|| LocvizError::InvalidDate {
            record,
            value: format!("{}T00:00{}", raw.date, raw.timezone),
        })?;
    let datetime = parse_timestamp(&raw.datetime).ok_or_else(|| LocvizError::InvalidDate {
        record,
        value: raw.datetime.clone(),
    })?;

    Ok(Row {
        commit: raw.commit,
        file: raw.file,
        line: parse_number(&raw.line),
        depth: parse_number(&raw.depth),
        length: parse_number(&raw.length),
        kind: raw.kind,
        author: raw.author,
        date,
        time: raw.time,
        timezone: raw.timezone,
        datetime,
    })
}

fn parse_local_midnight(date: &str, timezone: &str) -> Option<DateTime<FixedOffset>> {
    let date = date.trim();
    let timezone = timezone.trim();
    let timezone = if timezone.is_empty() { "Z" } else { timezone };
    parse_timestamp(&format!("{date}T00:00:00{timezone}"))
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    const FALLBACKS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M%:z",
    ];
    FALLBACKS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "file,line,type,commit,author,date,time,timezone,datetime,depth,length\n";

    #[test]
    fn parses_typed_rows() {
        let data = format!(
            "{HEADER}src/main.rs,12,rs,abc123,Ana,2024-02-10,14:30:00,-08:00,2024-02-10T14:30:00-08:00,2,40\n"
        );
        let rows = load(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.line, 12.0);
        assert_eq!(row.depth, 2.0);
        assert_eq!(row.length, 40.0);
        assert_eq!(row.kind, "rs");
        assert_eq!(row.date.to_rfc3339(), "2024-02-10T00:00:00-08:00");
        assert_eq!(row.datetime.to_rfc3339(), "2024-02-10T14:30:00-08:00");
    }

    #[test]
    fn malformed_numbers_become_nan() {
        let data = format!(
            "{HEADER}a.css,x,css,c1,Ana,2024-02-10,09:00:00,+00:00,2024-02-10T09:00:00+00:00,,deep\n"
        );
        let rows = load(data.as_bytes()).unwrap();
        assert!(rows[0].line.is_nan());
        assert_eq!(rows[0].depth, 0.0);
        assert!(rows[0].length.is_nan());
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let data = format!(
            "{HEADER}a.css,1,css,c1,Ana,2024-02-10,09:00:00,+00:00,yesterday,1,1\n"
        );
        let err = load(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LocvizError::InvalidDate { record: 1, .. }));
    }

    #[test]
    fn missing_column_is_an_error() {
        let data = "file,line\na.rs,1\n";
        assert!(matches!(load(data.as_bytes()), Err(LocvizError::Csv(_))));
    }

    #[test]
    fn accepts_space_separated_timestamps() {
        let dt = parse_timestamp("2024-02-10 09:15:00+01:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-02-10T09:15:00+01:00");
    }
}
