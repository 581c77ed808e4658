use super::fetch::load_dataset;
use super::output;
use crate::breakdown::file_breakdown;
use crate::cli::{CommonArgs, SourceArgs};
use crate::explorer::ExplorerState;
use crate::narrative::steps;
use crate::selection::{selection_count_label, PlotProjection, Region};
use anyhow::Context;
use log::info;
use std::path::Path;

pub fn exec_stats(common: &CommonArgs, args: &SourceArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = load_dataset(common, &args.source)?;
    let state = ExplorerState::new(&data.commits).with_progress(args.progress);
    let projection = PlotProjection::fit(&data.commits, &data.config.plot);
    let view = state.recompute(&data.commits, &projection);
    let cutoff = state.cursor.cutoff();

    if json {
        output::stats_json(&view.stats, &data.source, args.progress, cutoff)?;
    } else if ndjson {
        output::ndjson(std::iter::once(&view.stats))?;
    } else {
        output::stats_table(&view.stats, args.progress, cutoff);
    }
    Ok(())
}

pub fn exec_commits(common: &CommonArgs, args: &SourceArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = load_dataset(common, &args.source)?;
    let state = ExplorerState::new(&data.commits).with_progress(args.progress);
    let filtered = state.cursor.filtered(&data.commits);
    let cutoff = state.cursor.cutoff();

    if json {
        output::commits_json(&filtered, &data.source, args.progress, cutoff)?;
    } else if ndjson {
        output::ndjson(filtered.iter().copied())?;
    } else {
        output::commits_table(&filtered);
    }
    Ok(())
}

pub fn exec_select(common: &CommonArgs, args: &SourceArgs, region: &str, json: bool) -> anyhow::Result<()> {
    let region = Region::parse(region).context("Failed to parse selection region")?;
    let data = load_dataset(common, &args.source)?;

    let projection = PlotProjection::fit(&data.commits, &data.config.plot);
    let state = ExplorerState::new(&data.commits)
        .with_progress(args.progress)
        .with_selection(Some(region));
    let view = state.recompute(&data.commits, &projection);
    let label = selection_count_label(view.selected.len());
    info!("{label} in {region:?}");

    if json {
        output::selection_json(&view.selected, &view.breakdown, &label, region, &data.source, args.progress)?;
    } else {
        output::selection_table(&label, &view.breakdown);
    }
    Ok(())
}

pub fn exec_files(common: &CommonArgs, args: &SourceArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = load_dataset(common, &args.source)?;
    let state = ExplorerState::new(&data.commits).with_progress(args.progress);
    let files = file_breakdown(&state.cursor.filtered(&data.commits));

    if json {
        output::files_json(&files, &data.source, args.progress)?;
    } else if ndjson {
        output::ndjson(files.iter())?;
    } else {
        output::files_table(&files);
    }
    Ok(())
}

pub fn exec_story(common: &CommonArgs, source: &Path, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = load_dataset(common, source)?;
    let state = ExplorerState::new(&data.commits);
    let steps = steps(&data.commits, &state.cursor);

    if json {
        output::story_json(&steps, &data.source)?;
    } else if ndjson {
        output::ndjson(steps.iter())?;
    } else {
        output::story_text(&steps);
    }
    Ok(())
}

pub fn exec_timeline(common: &CommonArgs, args: &SourceArgs) -> anyhow::Result<()> {
    let data = load_dataset(common, &args.source)?;
    crate::tui::run(&data, args.progress).context("Terminal UI failed")
}
