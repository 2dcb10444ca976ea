use anyhow::Result;
use clap::Parser;
use nodeconf::cli::{Cli, Commands};
use nodeconf::commands::{ExtractConfig, ExtractStatus};
use std::process::ExitCode;

/// Exit status when any fragment was rejected
const EXIT_REJECTED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    nodeconf::logging::init_logging(cli.verbose);

    match run(cli.command) {
        Ok(ExtractStatus::AllSucceeded) => ExitCode::SUCCESS,
        Ok(ExtractStatus::SomeFailed) => ExitCode::from(EXIT_REJECTED),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExtractStatus> {
    match command {
        Commands::Extract {
            paths,
            name,
            format,
            block,
            max_bytes,
            config,
            compact,
        } => nodeconf::commands::handle_extract(ExtractConfig {
            paths,
            name,
            format,
            block,
            max_bytes,
            config,
            compact,
        }),
        Commands::Init { force } => {
            nodeconf::commands::init_config(force)?;
            Ok(ExtractStatus::AllSucceeded)
        }
    }
}
