use crate::error::Result;
use crate::scale::{pie, Slice};
use log::info;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const EMPTY_PLACEHOLDER: &str = "Projects coming soon!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "year_label")]
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Years show up both as `"2024"` and `2024` in project lists.
fn year_label<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match Year::deserialize(deserializer)? {
        Year::Text(s) => s,
        Year::Number(n) => n.to_string(),
    })
}

pub fn load_projects<R: Read>(reader: R) -> Result<Vec<Project>> {
    let projects: Vec<Project> = serde_json::from_reader(reader)?;
    info!("Loaded {} projects", projects.len());
    Ok(projects)
}

pub fn load_projects_path(path: &Path) -> Result<Vec<Project>> {
    if path == Path::new("-") {
        return load_projects(std::io::stdin().lock());
    }
    let file = File::open(path)?;
    load_projects(BufReader::new(file))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCount {
    pub label: String,
    pub value: usize,
}

/// Project count per year, in first-seen order.
pub fn rollup_by_year(projects: &[Project]) -> Vec<YearCount> {
    let mut counts: Vec<YearCount> = Vec::new();
    for project in projects {
        match counts.iter_mut().find(|c| c.label == project.year) {
            Some(c) => c.value += 1,
            None => counts.push(YearCount {
                label: project.year.clone(),
                value: 1,
            }),
        }
    }
    counts
}

pub fn year_slices(counts: &[YearCount]) -> Vec<Slice> {
    let values: Vec<f64> = counts.iter().map(|c| c.value as f64).collect();
    pie(&values)
}

/// At most one highlighted pie wedge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieSelection {
    selected: Option<usize>,
}

impl PieSelection {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Clicking the highlighted wedge again clears it.
    pub fn toggle(&mut self, index: usize) {
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn year<'a>(&self, counts: &'a [YearCount]) -> Option<&'a str> {
        self.selected
            .and_then(|i| counts.get(i))
            .map(|c| c.label.as_str())
    }
}

/// Wedge under `angle` (radians, clockwise from the top), if any.
pub fn slice_at(slices: &[Slice], angle: f64) -> Option<usize> {
    slices
        .iter()
        .position(|s| s.span() > 0.0 && s.contains_angle(angle))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    query: String,
    pub year: Option<String>,
}

impl ProjectFilter {
    pub fn new(query: &str, year: Option<String>) -> Self {
        Self {
            query: query.to_lowercase(),
            year,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_lowercase();
    }

    pub fn matches(&self, project: &Project) -> bool {
        let year_ok = self.year.as_deref().map_or(true, |y| project.year == y);
        year_ok && project.title.to_lowercase().contains(&self.query)
    }
}

/// Projects passing both the year and the title search.
pub fn filter<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

pub fn latest(projects: &[Project], n: usize) -> &[Project] {
    &projects[..n.min(projects.len())]
}

pub fn title_label(count: usize) -> String {
    format!("{count} Projects")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Project> {
        load_projects(
            r#"[
                {"title": "Haiku Generator", "image": "a.png", "description": "", "year": "2024"},
                {"title": "Weather Map", "image": "b.png", "description": "", "year": 2023, "tags": ["maps"]},
                {"title": "Map of Haiku", "image": "c.png", "description": "", "year": "2024", "url": "https://example.com"}
            ]"#
            .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn years_accept_numbers_and_strings() {
        let projects = sample();
        assert_eq!(projects[1].year, "2023");
        assert_eq!(projects[1].tags, ["maps"]);
    }

    #[test]
    fn rollup_keeps_first_seen_order() {
        let counts = rollup_by_year(&sample());
        assert_eq!(
            counts,
            vec![
                YearCount { label: "2024".into(), value: 2 },
                YearCount { label: "2023".into(), value: 1 },
            ]
        );
        let slices = year_slices(&counts);
        assert_eq!(slices[0].start_angle, 0.0);
    }

    #[test]
    fn search_is_case_insensitive_and_combines_with_year() {
        let projects = sample();
        let f = ProjectFilter::new("HAIKU", None);
        assert_eq!(filter(&projects, &f).len(), 2);

        let counts = rollup_by_year(&projects);
        let mut pick = PieSelection::default();
        pick.toggle(1);
        let f = ProjectFilter::new("map", pick.year(&counts).map(str::to_string));
        let hits = filter(&projects, &f);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Weather Map");
    }

    #[test]
    fn toggling_twice_clears() {
        let mut pick = PieSelection::default();
        pick.toggle(0);
        assert_eq!(pick.selected(), Some(0));
        pick.toggle(2);
        assert_eq!(pick.selected(), Some(2));
        pick.toggle(2);
        assert_eq!(pick.selected(), None);
    }

    #[test]
    fn angle_hits_the_covering_wedge() {
        let counts = rollup_by_year(&sample());
        let slices = year_slices(&counts);
        // 2024 holds two thirds of the turn starting at the top.
        assert_eq!(slice_at(&slices, 0.1), Some(0));
        assert_eq!(slice_at(&slices, std::f64::consts::PI * 1.5), Some(1));
        assert_eq!(slice_at(&slices, -0.1), Some(1));
        assert_eq!(slice_at(&[], 1.0), None);
    }

    #[test]
    fn latest_caps_at_length() {
        let projects = sample();
        assert_eq!(latest(&projects, 2).len(), 2);
        assert_eq!(latest(&projects, 10).len(), 3);
        assert_eq!(title_label(3), "3 Projects");
    }
}
