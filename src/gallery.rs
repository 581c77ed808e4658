use crate::cli::CommonArgs;
use crate::config::Config;
use crate::model::SCHEMA_VERSION;
use crate::projects::{
    filter, latest, load_projects_path, rollup_by_year, slice_at, title_label, year_slices,
    PieSelection, Project, ProjectFilter, YearCount, EMPTY_PLACEHOLDER,
};
use crate::scale::Slice;
use anyhow::Context;
use chrono::{DateTime, Utc};
use console::style;
use log::{debug, warn};
use serde::Serialize;
use std::path::Path;

/// Wedge labels sit halfway out on a unit pie.
const LABEL_RADIUS: (f64, f64) = (0.0, 1.0);

#[derive(Debug, Clone, Serialize)]
pub struct Wedge<'a> {
    pub label: &'a str,
    pub count: usize,
    #[serde(flatten)]
    pub slice: Slice,
    pub centroid: (f64, f64),
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub title: String,
    pub query: String,
    pub year: Option<String>,
    pub wedges: Vec<Wedge<'a>>,
    pub projects: Vec<&'a Project>,
}

pub struct GalleryArgs<'a> {
    pub query: &'a str,
    pub year: Option<String>,
    pub angle: Option<f64>,
    pub limit: Option<usize>,
    pub json: bool,
}

pub fn exec(common: &CommonArgs, source: &Path, args: GalleryArgs) -> anyhow::Result<()> {
    let config = Config::load(common.config.as_deref()).context("Failed to load configuration")?;
    let all = load_projects_path(source)
        .with_context(|| format!("Failed to load projects from {}", source.display()))?;

    // Wedges always describe the full list so a year pick stays stable while searching.
    let years = rollup_by_year(&all);
    let slices = year_slices(&years);
    let pick = pick_wedge(&years, &slices, args.year.as_deref(), args.angle);
    let year = args.year.or_else(|| pick.year(&years).map(str::to_string));
    debug!("Year filter: {year:?}, wedge {:?}", pick.selected());

    let pool = match args.limit {
        Some(0) => latest(&all, config.projects.latest),
        Some(n) => latest(&all, n),
        None => &all[..],
    };
    let criteria = ProjectFilter::new(args.query, year.clone());
    let shown = filter(pool, &criteria);
    let wedges = wedges(&years, &slices, pick);

    if args.json {
        let output = GalleryOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: source.to_string_lossy().to_string(),
            title: title_label(shown.len()),
            query: criteria.query().to_string(),
            year,
            wedges,
            projects: shown,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_gallery(&shown, &wedges);
    }
    Ok(())
}

/// Highlight the wedge named by `--year`, else the one under `--angle` (degrees).
fn pick_wedge(years: &[YearCount], slices: &[Slice], year: Option<&str>, angle: Option<f64>) -> PieSelection {
    let mut pick = PieSelection::default();
    let index = match (year, angle) {
        (Some(y), _) => years.iter().position(|c| c.label == y),
        (None, Some(deg)) => {
            let hit = slice_at(slices, deg.to_radians());
            if hit.is_none() {
                warn!("No year wedge at {deg}°");
            }
            hit
        }
        (None, None) => None,
    };
    if let Some(i) = index {
        pick.toggle(i);
    }
    pick
}

fn wedges<'a>(years: &'a [YearCount], slices: &[Slice], pick: PieSelection) -> Vec<Wedge<'a>> {
    years
        .iter()
        .zip(slices)
        .map(|(count, slice)| Wedge {
            label: &count.label,
            count: count.value,
            slice: *slice,
            centroid: slice.centroid(LABEL_RADIUS.0, LABEL_RADIUS.1),
            selected: pick.selected() == Some(slice.index),
        })
        .collect()
}

fn output_gallery(projects: &[&Project], wedges: &[Wedge]) {
    if projects.is_empty() && wedges.is_empty() {
        println!("{EMPTY_PLACEHOLDER}");
        return;
    }

    println!("{}", style(title_label(projects.len())).bold());
    println!("{}", "─".repeat(50));
    for p in projects {
        println!("{} {}", style(&p.title).cyan().bold(), style(format!("({})", p.year)).dim());
        if !p.description.is_empty() {
            println!("  {}", p.description);
        }
        if let Some(url) = &p.url {
            println!("  {}", style(url).underlined());
        }
        if !p.tags.is_empty() {
            println!("  tags: {}", p.tags.join(", "));
        }
    }

    println!("\n{}", style("By year").bold());
    let total: usize = wedges.iter().map(|w| w.count).sum();
    for w in wedges {
        let marker = if w.selected { "▶" } else { " " };
        let share = crate::util::format_percent(w.count as f64 / total as f64);
        println!(
            "{marker} {:<8} {:>3} {:>7}  {:.0}°",
            w.label,
            w.count,
            share,
            w.slice.span().to_degrees()
        );
    }
}
