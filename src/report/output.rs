use crate::model::{
    Commit, CommitsOutput, FileSummary, FilesOutput, LanguageShare, SelectionOutput, Stats,
    StatsOutput, Step, StoryOutput, SCHEMA_VERSION,
};
use crate::selection::Region;
use crate::util::{display_figure, format_percent};
use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

pub fn ndjson<'a, T, I>(records: I) -> Result<()>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    for record in records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

pub fn stats_json(stats: &Stats, source: &str, progress: f64, cutoff: Option<DateTime<Utc>>) -> Result<()> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        progress,
        cutoff,
        stats: stats.clone(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn stats_table(stats: &Stats, progress: f64, cutoff: Option<DateTime<Utc>>) {
    println!("{}", style("Commit Summary").bold());
    println!("{}", "─".repeat(50));

    match cutoff {
        Some(c) if progress < 100.0 => {
            println!("Up to: {}", style(c.format("%Y-%m-%d %H:%M UTC")).dim())
        }
        _ => {}
    }

    println!("Total LOC: {}", style(stats.total_lines).cyan());
    println!("Total commits: {}", style(stats.commits).cyan());
    println!("Number of files: {}", style(stats.files).cyan());
    println!("Maximum file length: {}", style(display_figure(stats.max_line, 0)).green());
    println!("Longest line: {}", style(display_figure(stats.longest_line, 0)).green());
    println!("Maximum depth: {}", style(display_figure(stats.max_depth, 0)).green());
    println!("Average depth: {}", style(display_figure(stats.average_depth, 2)).yellow());
    println!(
        "Largest commit: {}",
        style(
            stats
                .max_lines_per_commit
                .map(|n| format!("{n} lines"))
                .unwrap_or_else(|| "unknown".to_string())
        )
        .yellow()
    );
    println!(
        "Most active time of day: {}",
        style(stats.busiest_period.as_deref().unwrap_or("unknown")).magenta()
    );
}

pub fn commits_json(commits: &[&Commit], source: &str, progress: f64, cutoff: Option<DateTime<Utc>>) -> Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        progress,
        cutoff,
        commits: commits.iter().map(|c| (*c).clone()).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn commits_table(commits: &[&Commit]) {
    if commits.is_empty() {
        println!("No commits to display");
        return;
    }

    println!(
        "{:<10} {:<20} {:<26} {:>6} {:>6}",
        style("Commit").bold(),
        style("Author").bold(),
        style("When").bold(),
        style("Hour").bold(),
        style("Lines").bold()
    );
    println!("{}", "─".repeat(72));
    for c in commits {
        println!(
            "{:<10} {:<20} {:<26} {:>6.2} {:>6}",
            c.short_id(),
            truncate(&c.author, 20),
            c.datetime.format("%Y-%m-%d %H:%M %:z"),
            c.hour_frac,
            c.total_lines
        );
    }
}

pub fn selection_json(
    selected: &[&Commit],
    breakdown: &[LanguageShare],
    label: &str,
    region: Region,
    source: &str,
    progress: f64,
) -> Result<()> {
    let output = SelectionOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        progress,
        region,
        label: label.to_string(),
        commits: selected.iter().map(|c| (*c).clone()).collect(),
        breakdown: breakdown.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn selection_table(label: &str, breakdown: &[LanguageShare]) {
    println!("{}", style(label).bold());
    if breakdown.is_empty() {
        return;
    }
    println!("{}", "─".repeat(40));
    for share in breakdown {
        println!(
            "{:<12} {} lines ({})",
            style(&share.kind).cyan(),
            share.lines,
            format_percent(share.proportion)
        );
    }
}

pub fn files_json(files: &[FileSummary], source: &str, progress: f64) -> Result<()> {
    let output = FilesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        progress,
        files: files.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn files_table(files: &[FileSummary]) {
    if files.is_empty() {
        println!("No files to display");
        return;
    }

    println!(
        "{:<50} {:>8} {:>10}",
        style("File").bold(),
        style("Lines").bold(),
        style("Type").bold()
    );
    println!("{}", "─".repeat(70));
    for f in files.iter().take(50) {
        println!(
            "{:<50} {:>8} {:>10}",
            truncate(&f.file, 50),
            f.lines,
            f.dominant_type().unwrap_or("")
        );
    }
    if files.len() > 50 {
        println!("\n... and {} more files", files.len() - 50);
    }
}

pub fn story_json(steps: &[Step], source: &str) -> Result<()> {
    let output = StoryOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        steps: steps.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn story_text(steps: &[Step]) {
    if steps.is_empty() {
        println!("No commits to narrate");
        return;
    }
    for step in steps {
        println!(
            "{} {}",
            style(format!("[{:>5.1}%]", step.progress)).dim(),
            step.text
        );
        println!();
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
