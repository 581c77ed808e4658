use crate::aggregate::aggregate;
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::loader::load_path;
use crate::model::Commit;
use anyhow::Context;
use log::warn;
use std::path::Path;

/// Commits loaded from one source, and the settings they were built with.
pub struct Dataset {
    pub source: String,
    pub config: Config,
    pub commits: Vec<Commit>,
}

pub fn load_dataset(common: &CommonArgs, source: &Path) -> anyhow::Result<Dataset> {
    let config = Config::load(common.config.as_deref()).context("Failed to load configuration")?;

    let rows = load_path(source)
        .with_context(|| format!("Failed to load change log from {}", source.display()))?;
    if rows.is_empty() {
        warn!("{} contains no rows", source.display());
    }

    let commits = aggregate(&rows, config.commit_url_base.as_deref());

    Ok(Dataset {
        source: source.to_string_lossy().to_string(),
        config,
        commits,
    })
}
