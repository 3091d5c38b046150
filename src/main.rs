mod cli;
mod commands;
mod ingest;
mod model;
mod pipeline;
mod render;
mod util;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConvertArgs};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match (cli.command, cli.path) {
        (Some(Commands::Convert(args)), _) => commands::convert::run(args),
        (Some(Commands::Batch(args)), _) => commands::batch::run(args),
        (Some(Commands::Fields(args)), _) => commands::fields::run(args),
        (None, Some(path)) => commands::convert::run(ConvertArgs::beside_input(path)),
        (None, None) => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a PDF or DOCX file path is required",
            )
            .exit(),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
