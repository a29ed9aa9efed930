//! CLI module for structval
//!
//! Provides command-line interface for:
//! - check: validate one JSON document against a rule set
//! - batch: validate newline-delimited JSON documents from stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, DEFAULT_CONFIG_PATH};
pub use commands::{batch, batch_documents, check, check_document, run, run_command, BatchSummary};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{json_report, read_document, read_documents, text_report, write_report};
