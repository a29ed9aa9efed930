//! CLI command implementations
//!
//! Each command loads the configuration (explicit path required, default
//! path optional), installs logging, loads the rule set, then validates.
//! Reports go to stdout; the returned error decides the exit status.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{error, info};

use crate::config::{Config, OutputFormat};
use crate::document::RuleSet;
use crate::logging::init_logging;
use crate::validator::{ValidateError, ValidateResult};

use super::args::{Command, DEFAULT_CONFIG_PATH};
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{read_document, read_document_file, read_documents, write_report};

/// Counts of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub documents: usize,
    pub invalid: usize,
    pub schema_errors: usize,
}

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check {
            rules,
            input,
            config,
            format,
        } => check(&rules, input.as_deref(), config.as_deref(), format),
        Command::Batch {
            rules,
            config,
            format,
        } => batch(&rules, config.as_deref(), format),
    }
}

fn prepare(config_path: Option<&Path>, format: Option<OutputFormat>) -> CliResult<(Config, OutputFormat)> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH), false)?,
    };
    init_logging(&config.log_filter);
    let format = format.unwrap_or(config.output);
    Ok((config, format))
}

/// Validate one document from a file or stdin
pub fn check(
    rules_path: &Path,
    input: Option<&Path>,
    config_path: Option<&Path>,
    format: Option<OutputFormat>,
) -> CliResult<()> {
    let (config, format) = prepare(config_path, format)?;
    let rules = RuleSet::load(rules_path)?;

    let document = match input {
        Some(path) => read_document_file(path)?,
        None => read_document(&mut io::stdin().lock())?,
    };

    let stdout = io::stdout();
    let result = check_document(&rules, &document, format, &mut stdout.lock())?;
    outcome(&result, &config)
}

/// Validate newline-delimited documents from stdin
pub fn batch(rules_path: &Path, config_path: Option<&Path>, format: Option<OutputFormat>) -> CliResult<()> {
    let (config, format) = prepare(config_path, format)?;
    let rules = RuleSet::load(rules_path)?;

    let stdout = io::stdout();
    let summary = batch_documents(&rules, io::stdin().lock(), format, &mut stdout.lock())?;

    if summary.schema_errors > 0 {
        return Err(CliError::new(
            CliErrorCode::SchemaError,
            format!("{} document(s) hit a schema error", summary.schema_errors),
        ));
    }
    if summary.invalid > 0 && config.fail_on_violation {
        return Err(CliError::violations(summary.invalid));
    }
    Ok(())
}

/// Validate a document and write its report.
pub fn check_document<W: Write>(
    rules: &RuleSet,
    document: &serde_json::Value,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<ValidateResult> {
    let result = rules.validate_document(document);
    log_result(&result, None);
    write_report(out, &result, format, None)?;
    Ok(result)
}

/// Validate every document of a reader, one report line each.
///
/// Malformed JSON aborts the batch; validation failures do not.
pub fn batch_documents<R: BufRead, W: Write>(
    rules: &RuleSet,
    reader: R,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<BatchSummary> {
    let mut summary = BatchSummary::default();

    for item in read_documents(reader) {
        let (line, document) = item?;
        let result = rules.validate_document(&document);
        log_result(&result, Some(line));
        write_report(out, &result, format, Some(line))?;

        summary.documents += 1;
        match result {
            Ok(()) => {}
            Err(ValidateError::Invalid(_)) => summary.invalid += 1,
            Err(ValidateError::Schema(_)) => summary.schema_errors += 1,
        }
    }

    info!(
        documents = summary.documents,
        invalid = summary.invalid,
        schema_errors = summary.schema_errors,
        "batch complete"
    );
    Ok(summary)
}

fn log_result(result: &ValidateResult, line: Option<usize>) {
    match result {
        Ok(()) => info!(line, "document valid"),
        Err(ValidateError::Invalid(errors)) => {
            info!(line, violations = errors.len(), "document invalid")
        }
        Err(ValidateError::Schema(err)) => {
            error!(line, code = err.code(), error = %err, "schema error")
        }
    }
}

fn outcome(result: &ValidateResult, config: &Config) -> CliResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(ValidateError::Schema(err)) => Err(CliError::schema_error(err)),
        Err(ValidateError::Invalid(_)) if config.fail_on_violation => Err(CliError::violations(1)),
        Err(ValidateError::Invalid(_)) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldRule;
    use serde_json::json;
    use std::io::Cursor;

    fn rules() -> RuleSet {
        RuleSet::new(vec![
            FieldRule::new("ID", "len:3"),
            FieldRule::new("Age", "min:18"),
        ])
    }

    #[test]
    fn test_check_document_writes_report() {
        let mut out = Vec::new();
        let result =
            check_document(&rules(), &json!({"ID": "abcd", "Age": 20}), OutputFormat::Json, &mut out)
                .unwrap();
        assert!(result.is_err());

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["status"], "invalid");
        assert_eq!(report["errors"][0]["field"], "ID");
    }

    #[test]
    fn test_batch_counts_outcomes() {
        let input = Cursor::new(
            "{\"ID\": \"abc\", \"Age\": 20}\n\
             {\"ID\": \"ab\", \"Age\": 10}\n\
             \n\
             {\"ID\": \"abc\", \"Age\": 1.5}\n",
        );
        let mut out = Vec::new();
        let summary = batch_documents(&rules(), input, OutputFormat::Text, &mut out).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                documents: 3,
                invalid: 1,
                schema_errors: 1
            }
        );

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "line 1: ok");
        assert!(lines[1].starts_with("line 2: field 'ID'"));
        assert_eq!(lines[2], "field 'Age': violations: val '10', [min:18]");
        assert!(lines[3].starts_with("line 4: error STRUCTVAL_UNSUPPORTED_TYPE"));
    }

    #[test]
    fn test_batch_aborts_on_malformed_json() {
        let input = Cursor::new("{\"ID\": \"abc\", \"Age\": 20}\n{oops\n");
        let mut out = Vec::new();
        assert!(batch_documents(&rules(), input, OutputFormat::Json, &mut out).is_err());
    }

    #[test]
    fn test_outcome_respects_fail_on_violation() {
        let result = rules().validate_document(&json!({"ID": "ab", "Age": 20}));

        let strict = Config::default();
        assert_eq!(
            outcome(&result, &strict).unwrap_err().code(),
            &CliErrorCode::Violations
        );

        let lenient = Config {
            fail_on_violation: false,
            ..Config::default()
        };
        assert!(outcome(&result, &lenient).is_ok());
    }

    #[test]
    fn test_outcome_schema_error_always_fails() {
        let result = rules().validate_document(&json!({"ID": "abc"}));
        let lenient = Config {
            fail_on_violation: false,
            ..Config::default()
        };
        assert_eq!(
            outcome(&result, &lenient).unwrap_err().code(),
            &CliErrorCode::SchemaError
        );
    }
}
