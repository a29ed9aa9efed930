//! CLI argument definitions using clap
//!
//! Commands:
//! - structval check --rules <path> [--input <path>]
//! - structval batch --rules <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

/// structval - declarative validation of JSON documents against rule sets
#[derive(Parser, Debug)]
#[command(name = "structval")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a single JSON document
    Check {
        /// Path to the rule set file
        #[arg(long)]
        rules: PathBuf,

        /// Path to the document (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report format, overrides the configuration file
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Validate newline-delimited JSON documents from stdin
    Batch {
        /// Path to the rule set file
        #[arg(long)]
        rules: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report format, overrides the configuration file
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

/// Default configuration file, used when present
pub const DEFAULT_CONFIG_PATH: &str = "./structval.json";

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "structval", "check", "--rules", "rules.json", "--input", "doc.json", "--format", "text",
        ])
        .unwrap();
        match cli.command {
            Command::Check { rules, input, config, format } => {
                assert_eq!(rules, PathBuf::from("rules.json"));
                assert_eq!(input, Some(PathBuf::from("doc.json")));
                assert_eq!(config, None);
                assert_eq!(format, Some(OutputFormat::Text));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_batch() {
        let cli = Cli::try_parse_from(["structval", "batch", "--rules", "r.json"]).unwrap();
        assert!(matches!(cli.command, Command::Batch { format: None, .. }));
    }

    #[test]
    fn test_rules_required() {
        assert!(Cli::try_parse_from(["structval", "check"]).is_err());
    }
}
