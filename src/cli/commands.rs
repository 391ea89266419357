//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Yandex Direct tap CLI
#[derive(Parser, Debug)]
#[command(name = "tap-yandex-direct")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline config JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test connection and credentials against the API
    Check,

    /// Print the stream catalog (names, keys, schemas)
    Discover,

    /// Extract records and emit messages as JSON lines on stdout
    Read {
        /// Root streams to sync (comma-separated, empty = all)
        #[arg(long)]
        streams: Option<String>,

        /// Maximum records to emit across all streams
        #[arg(long)]
        max_records: Option<usize>,

        /// Continue with remaining root streams after a failure
        #[arg(long)]
        no_fail_fast: bool,
    },

    /// Validate the configuration without making requests
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read_command() {
        let cli = Cli::try_parse_from([
            "tap-yandex-direct",
            "--config",
            "config.json",
            "read",
            "--streams",
            "campaigns,ad_performance",
            "--max-records",
            "100",
        ])
        .unwrap();

        assert_eq!(cli.config.unwrap().to_str(), Some("config.json"));
        match cli.command {
            Commands::Read {
                streams,
                max_records,
                no_fail_fast,
            } => {
                assert_eq!(streams.as_deref(), Some("campaigns,ad_performance"));
                assert_eq!(max_records, Some(100));
                assert!(!no_fail_fast);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_discover() {
        let cli = Cli::try_parse_from(["tap-yandex-direct", "discover"]).unwrap();
        assert!(matches!(cli.command, Commands::Discover));
    }

    #[test]
    fn test_missing_subcommand_rejected() {
        assert!(Cli::try_parse_from(["tap-yandex-direct"]).is_err());
    }
}
