use crate::model::{Commit, Row};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Group rows into one commit per distinct id, in first-seen order.
///
/// Commit metadata comes from the first row of each group; the rows are
/// attached by reference.
pub fn aggregate(rows: &[Arc<Row>], url_base: Option<&str>) -> Vec<Commit> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<Arc<Row>>> = HashMap::new();

    for row in rows {
        let key = row.commit.as_str();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(Arc::clone(row));
    }

    let commits: Vec<Commit> = order
        .into_iter()
        .filter_map(|id| {
            let lines = groups.remove(id)?;
            Commit::from_group(id.to_string(), lines, url_base)
        })
        .collect();

    debug!("Aggregated {} rows into {} commits", rows.len(), commits.len());
    commits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_timestamp;

    fn row(commit: &str, file: &str, at: &str) -> Arc<Row> {
        let datetime = parse_timestamp(at).unwrap();
        Arc::new(Row {
            commit: commit.to_string(),
            file: file.to_string(),
            line: 1.0,
            depth: 1.0,
            length: 10.0,
            kind: "rs".to_string(),
            author: "Ana".to_string(),
            date: datetime,
            time: String::new(),
            timezone: "+00:00".to_string(),
            datetime,
        })
    }

    #[test]
    fn groups_in_first_seen_order() {
        let rows = vec![
            row("b", "x.rs", "2024-01-02T10:00:00+00:00"),
            row("a", "y.rs", "2024-01-01T09:30:00+00:00"),
            row("b", "z.rs", "2024-01-02T10:00:00+00:00"),
        ];
        let commits = aggregate(&rows, None);
        let ids: Vec<_> = commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(commits[0].total_lines, 2);
        assert_eq!(commits[0].lines().len(), 2);
        assert_eq!(commits[0].file_count(), 2);
        assert_eq!(commits[1].hour_frac, 9.5);
    }

    #[test]
    fn rows_are_shared_not_copied() {
        let rows = vec![row("a", "x.rs", "2024-01-01T00:00:00+00:00")];
        let commits = aggregate(&rows, None);
        assert!(Arc::ptr_eq(&rows[0], &commits[0].lines()[0]));
    }

    #[test]
    fn url_base_is_prefixed() {
        let rows = vec![row("abc", "x.rs", "2024-01-01T00:00:00+00:00")];
        let commits = aggregate(&rows, Some("https://example.com/commit/"));
        assert_eq!(commits[0].url.as_deref(), Some("https://example.com/commit/abc"));
    }

    #[test]
    fn lines_are_hidden_from_serialization_and_debug() {
        let rows = vec![row("abc", "x.rs", "2024-01-01T00:00:00+00:00")];
        let commits = aggregate(&rows, None);
        let json = serde_json::to_value(&commits[0]).unwrap();
        assert!(json.get("lines").is_none());
        assert_eq!(json["total_lines"], 1);
        assert!(!format!("{:?}", commits[0]).contains("x.rs"));
    }

    #[test]
    fn empty_input_yields_no_commits() {
        assert!(aggregate(&[], None).is_empty());
    }
}
