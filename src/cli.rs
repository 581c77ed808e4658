use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "locviz")]
#[command(about = "Commit timeline analytics for per-line code-change logs")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to config file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    #[arg(help = "Per-line change log (CSV), or - for stdin")]
    pub source: PathBuf,

    #[arg(long, default_value_t = 100.0, value_parser = parse_progress, help = "Time cursor position, 0-100")]
    pub progress: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics for commits up to the time cursor
    Stats {
        #[clap(flatten)]
        source: SourceArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Aggregated commits up to the time cursor
    Commits {
        #[clap(flatten)]
        source: SourceArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Commits inside a rectangle of the scatter plot, with a type breakdown
    Select {
        #[clap(flatten)]
        source: SourceArgs,

        #[arg(long, allow_hyphen_values = true, help = "Plot rectangle as x0,y0,x1,y1")]
        region: String,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Lines per file for commits up to the time cursor
    Files {
        #[clap(flatten)]
        source: SourceArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Chronological narration of every commit
    Story {
        #[arg(help = "Per-line change log (CSV), or - for stdin")]
        source: PathBuf,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Interactive scatter plot with time slider and brush selection
    #[command(alias = "tui", alias = "ui")]
    Timeline {
        #[clap(flatten)]
        source: SourceArgs,
    },
    /// Project gallery filtered by title search and year
    Projects {
        #[arg(help = "Project list (JSON), or - for stdin")]
        source: PathBuf,

        #[arg(long, default_value = "", help = "Case-insensitive title search")]
        query: String,

        #[arg(long, help = "Only projects from this year")]
        year: Option<String>,

        #[arg(long, allow_hyphen_values = true, help = "Pick the year wedge under this angle (degrees clockwise from the top)")]
        angle: Option<f64>,

        #[arg(long, help = "Show only the first N projects (0 uses the configured default)")]
        latest: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

fn parse_progress(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (crate::cursor::MIN_PROGRESS..=crate::cursor::MAX_PROGRESS).contains(&value) {
        Ok(value)
    } else {
        Err(format!("progress must be between 0 and 100, got {value}"))
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Logs go to stderr; `RUST_LOG` wins over `-v`.
    pub fn init_logging(&self) {
        let level = match self.common.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .format_timestamp(None)
            .try_init();
    }

    pub fn execute(self) -> Result<()> {
        let common = self.common;
        match self.command {
            Commands::Stats { source, json, ndjson } => {
                crate::report::exec_stats(&common, &source, json, ndjson)
            }
            Commands::Commits { source, json, ndjson } => {
                crate::report::exec_commits(&common, &source, json, ndjson)
            }
            Commands::Select { source, region, json } => {
                crate::report::exec_select(&common, &source, &region, json)
            }
            Commands::Files { source, json, ndjson } => {
                crate::report::exec_files(&common, &source, json, ndjson)
            }
            Commands::Story { source, json, ndjson } => {
                crate::report::exec_story(&common, &source, json, ndjson)
            }
            Commands::Timeline { source } => crate::report::exec_timeline(&common, &source),
            Commands::Projects { source, query, year, angle, latest, json } => {
                let args = crate::gallery::GalleryArgs {
                    query: &query,
                    year,
                    angle,
                    limit: latest,
                    json,
                };
                crate::gallery::exec(&common, &source, args)
            }
        }
    }
}
