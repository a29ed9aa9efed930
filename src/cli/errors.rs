//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero status.

use std::fmt;
use std::io;

use crate::document::RuleSetError;
use crate::validator::SchemaError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/files)
    IoError,
    /// Rule set could not be loaded
    RulesError,
    /// Rules or field types are invalid for the document
    SchemaError,
    /// One or more documents violate the rules
    Violations,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "STRUCTVAL_CLI_CONFIG_ERROR",
            Self::IoError => "STRUCTVAL_CLI_IO_ERROR",
            Self::RulesError => "STRUCTVAL_CLI_RULES_ERROR",
            Self::SchemaError => "STRUCTVAL_CLI_SCHEMA_ERROR",
            Self::Violations => "STRUCTVAL_CLI_VIOLATIONS",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Rule set error
    pub fn rules_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::RulesError, msg)
    }

    /// Schema error raised while validating
    pub fn schema_error(err: &SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, format!("{}: {}", err.code(), err))
    }

    /// Documents with violations
    pub fn violations(documents: usize) -> Self {
        Self::new(
            CliErrorCode::Violations,
            format!("{} document(s) violate the rules", documents),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<RuleSetError> for CliError {
    fn from(e: RuleSetError) -> Self {
        Self::rules_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
