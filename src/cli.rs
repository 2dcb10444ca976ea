use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nodeconf")]
#[command(about = "Extract declared settings from Python node fragments", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the configuration class from one or more fragments
    Extract {
        /// Source files to read; `-` or no path reads stdin
        paths: Vec<PathBuf>,

        /// Node name (defaults to the file stem; only valid with a single input)
        #[arg(short, long)]
        name: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Name of the class to extract
        #[arg(long)]
        block: Option<String>,

        /// Reject fragments larger than this many bytes
        #[arg(long = "max-bytes")]
        max_bytes: Option<usize>,

        /// Configuration file (defaults to the nearest .nodeconf.toml)
        #[arg(short, long, env = "NODECONF_CONFIG")]
        config: Option<PathBuf>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Write a default .nodeconf.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract_flags() {
        let cli = Cli::try_parse_from([
            "nodeconf", "-vv", "extract", "a.py", "b.py", "--format", "terminal", "--block",
            "Settings", "--max-bytes", "4096",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Extract {
                paths,
                format,
                block,
                max_bytes,
                compact,
                ..
            } => {
                assert_eq!(paths, vec![PathBuf::from("a.py"), PathBuf::from("b.py")]);
                assert_eq!(format, Some(OutputFormat::Terminal));
                assert_eq!(block.as_deref(), Some("Settings"));
                assert_eq!(max_bytes, Some(4096));
                assert!(!compact);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["nodeconf", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}
