mod cli;

use crate::cli::{Cli, Summary};
use clap::Parser;
use renamr_config::Loader;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,renamr=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match Loader::new().file(cli.config.as_ref()).overrides(cli.overrides()).load() {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = ?e, "Configuration failed");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        },
    };
    let renamer = match config.renamer() {
        Ok(renamer) => renamer,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        },
    };

    let batch = match renamer.batch(&cli.folder) {
        Ok(batch) => batch,
        Err(e) => {
            tracing::debug!(error = ?e, "Batch could not start");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        },
    };

    let mut summary = Summary::default();
    for outcome in batch {
        println!("{outcome}");
        summary.record(&outcome);
    }
    println!("{summary}");
    ExitCode::SUCCESS
}
