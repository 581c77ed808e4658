use anyhow::Result;
use locviz::cli::Cli;
use log::error;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    cli.execute().inspect_err(|e| error!("{e:#}"))
}
