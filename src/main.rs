use anyhow::Result;
use clap::Parser;

use arxiv_citation_explorer::cli::{Cli, Commands};
use arxiv_citation_explorer::commands::{run_build, run_explore, run_ingest, run_pipeline, run_taxonomy};
use arxiv_citation_explorer::common::setup_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.command.log_level())?;

    match cli.command {
        Commands::Ingest(args) => {
            run_ingest(args)?;
        }
        Commands::Taxonomy(args) => {
            run_taxonomy(args)?;
        }
        Commands::Build(args) => {
            run_build(args)?;
        }
        Commands::Pipeline(args) => {
            run_pipeline(args)?;
        }
        Commands::Explore(args) => {
            run_explore(args)?;
        }
    }

    Ok(())
}
