//! Configuration file for the `structval` binary
//!
//! JSON, every key optional:
//!
//! ```json
//! { "output": "text", "log_filter": "structval=debug", "fail_on_violation": false }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::{CliError, CliResult};

/// Report format for validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Report format (default "json")
    #[serde(default = "default_output")]
    pub output: OutputFormat,

    /// Tracing filter directive (default "structval=warn")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Exit non-zero when a document has violations (default true)
    #[serde(default = "default_fail_on_violation")]
    pub fail_on_violation: bool,
}

fn default_output() -> OutputFormat {
    OutputFormat::Json
}
fn default_log_filter() -> String {
    "structval=warn".to_string()
}
fn default_fail_on_violation() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            log_filter: default_log_filter(),
            fail_on_violation: default_fail_on_violation(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    /// and `required` is false.
    pub fn load_or_default(path: &Path, required: bool) -> CliResult<Self> {
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> CliResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(CliError::config_error("log_filter must not be empty"));
        }
        Ok(())
    }
}
