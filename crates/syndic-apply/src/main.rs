//! syndic — apply a declarative manifest to a cluster coordination service.
//!
//! Two flags: `-f` selects the manifest file, `-v` (repeatable) raises the
//! log level. One invocation is one reconciliation run; the process exits
//! non-zero when the manifest fails to load or any attempted stage aborts.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::Level;

use syndic_apply::cluster::AdminClient;
use syndic_apply::driver::{Driver, RunReport};
use syndic_core::manifest;

#[derive(Parser, Debug)]
#[command(name = "syndic", version)]
#[command(about = "Reconcile a declarative manifest against a cluster coordination service")]
struct Cli {
    /// Path to the manifest YAML file.
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Raise log verbosity: -v warn, -vv info, -vvv debug (default: error).
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        _ => Level::DEBUG,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Verbosity is fixed here, from the flag, before anything else runs.
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .init();

    match run(&cli).await {
        Ok(report) if report.all_clean() => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> syndic_core::Result<RunReport> {
    let manifest = manifest::load_from_file(&cli.file)?;
    let client = AdminClient::new(&manifest.cluster, &manifest.admin_token)?;
    Ok(Driver::new(client).run(&manifest).await)
}
