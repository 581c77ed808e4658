use crate::model::{Commit, FileSummary};
use crate::stats::rows_of;
use std::collections::HashMap;

/// Per-file line counts for the given commits, largest file first.
/// Files with equal counts keep the order they were first seen in.
pub fn file_breakdown(commits: &[&Commit]) -> Vec<FileSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut files: HashMap<&str, (usize, Vec<(String, usize)>)> = HashMap::new();

    for row in rows_of(commits) {
        let entry = files.entry(row.file.as_str()).or_insert_with(|| {
            order.push(row.file.as_str());
            (0, Vec::new())
        });
        entry.0 += 1;
        match entry.1.iter_mut().find(|(kind, _)| *kind == row.kind) {
            Some((_, count)) => *count += 1,
            None => entry.1.push((row.kind.clone(), 1)),
        }
    }

    let mut summaries: Vec<FileSummary> = order
        .into_iter()
        .filter_map(|file| {
            let (lines, types) = files.remove(file)?;
            Some(FileSummary {
                file: file.to_string(),
                lines,
                types,
            })
        })
        .collect();

    summaries.sort_by(|a, b| b.lines.cmp(&a.lines));
    summaries
}

impl FileSummary {
    /// The change type with the most lines in this file.
    pub fn dominant_type(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.types {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(kind, _)| kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::loader::load;

    const LOG: &str = "\
file,line,type,commit,author,date,time,timezone,datetime,depth,length
a.js,1,js,c1,Ana,2024-01-01,10:00:00,+00:00,2024-01-01T10:00:00+00:00,1,10
b.css,1,css,c1,Ana,2024-01-01,10:00:00,+00:00,2024-01-01T10:00:00+00:00,1,10
b.css,2,css,c2,Ana,2024-01-02,10:00:00,+00:00,2024-01-02T10:00:00+00:00,1,10
b.css,3,js,c2,Ana,2024-01-02,10:00:00,+00:00,2024-01-02T10:00:00+00:00,1,10
c.html,1,html,c2,Ana,2024-01-02,10:00:00,+00:00,2024-01-02T10:00:00+00:00,1,10
";

    #[test]
    fn largest_file_first_ties_in_first_seen_order() {
        let commits = aggregate(&load(LOG.as_bytes()).unwrap(), None);
        let all: Vec<&Commit> = commits.iter().collect();
        let files = file_breakdown(&all);

        let order: Vec<(&str, usize)> = files.iter().map(|f| (f.file.as_str(), f.lines)).collect();
        assert_eq!(order, vec![("b.css", 3), ("a.js", 1), ("c.html", 1)]);
        assert_eq!(files[0].types, vec![("css".to_string(), 2), ("js".to_string(), 1)]);
        assert_eq!(files[0].dominant_type(), Some("css"));
    }

    #[test]
    fn no_commits_no_files() {
        assert!(file_breakdown(&[]).is_empty());
    }
}
