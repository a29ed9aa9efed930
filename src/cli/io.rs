//! JSON I/O handling for CLI
//!
//! - Input: one JSON document (file or stdin), or one document per line
//! - Output: one report per document on stdout, JSON or text
//! - UTF-8 only

use std::fs;
use std::io::{BufRead, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::config::OutputFormat;
use crate::validator::{ValidateError, ValidateResult};

use super::errors::{CliError, CliResult};

/// Read a whole JSON document from a reader
pub fn read_document<R: Read>(reader: &mut R) -> CliResult<Value> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Read a JSON document from a file
pub fn read_document_file(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read '{}': {}", path.display(), e)))?;
    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Read newline-delimited JSON documents, skipping blank lines.
///
/// Yields the 1-based line number with each document.
pub fn read_documents<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<(usize, Value)>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(CliError::from(e))),
            };
            if line.trim().is_empty() {
                return None;
            }
            Some(
                serde_json::from_str(&line)
                    .map(|value| (idx + 1, value))
                    .map_err(|e| CliError::io_error(format!("line {}: invalid JSON: {}", idx + 1, e))),
            )
        })
}

/// Build the JSON report for one validation result
pub fn json_report(result: &ValidateResult, line: Option<usize>) -> Value {
    let mut report = match result {
        Ok(()) => json!({ "status": "ok" }),
        Err(ValidateError::Invalid(errors)) => json!({
            "status": "invalid",
            "errors": errors
        }),
        Err(ValidateError::Schema(err)) => json!({
            "status": "error",
            "code": err.code(),
            "message": err.to_string()
        }),
    };
    if let (Some(line), Some(object)) = (line, report.as_object_mut()) {
        object.insert("line".to_string(), json!(line));
    }
    report
}

/// Build the text report for one validation result
pub fn text_report(result: &ValidateResult, line: Option<usize>) -> String {
    let body = match result {
        Ok(()) => "ok".to_string(),
        Err(ValidateError::Invalid(errors)) => errors.to_string(),
        Err(ValidateError::Schema(err)) => format!("error {}: {}", err.code(), err),
    };
    match line {
        Some(line) => format!("line {}: {}", line, body),
        None => body,
    }
}

/// Write one report
pub fn write_report<W: Write>(
    out: &mut W,
    result: &ValidateResult,
    format: OutputFormat,
    line: Option<usize>,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &json_report(result, line))?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}", text_report(result, line))?;
        }
    }
    out.flush()?;
    Ok(())
}
