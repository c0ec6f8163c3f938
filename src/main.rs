mod cli;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use combine_code::{print_summary, ArchiveWriter, ExcludeConfig};

use crate::cli::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    if let Err(e) = run(&args) {
        eprintln!("\n{} {e:#}", style("Fatal error:").red().bold());
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> anyhow::Result<()> {
    let root = args.project_root()?;
    let config = ExcludeConfig::default();

    let summary = ArchiveWriter::new(root, &config).run()?;
    print_summary(&summary);

    Ok(())
}
