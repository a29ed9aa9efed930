//! Struct validator: recursive descent over a record
//!
//! Per field, in declaration order:
//! - no rule: skipped, type never inspected
//! - empty rule: schema error
//! - unsupported type: schema error
//! - nested record: rule must be exactly `nested`, then recurse
//! - scalar or list: field validator
//!
//! The first schema error aborts the whole call and discards any violations
//! collected so far. Violations of a nested record are wrapped as one error
//! of the parent field, keeping the tree shape.

use tracing::{debug, trace};

use super::errors::{Cause, SchemaError, ValidateError, ValidateResult, ValidationError, ValidationErrors};
use super::field::{validate_integer, validate_integer_list, validate_text, validate_text_list};
use super::rules::{is_nested_marker, parse_rule};
use super::types::{AsRecord, Classified, Field, Record, Value};

/// Validates a value that must be a record.
///
/// # Errors
///
/// - `ValidateError::Schema` if the value is not a record, or any annotated
///   field has a bad rule or an unsupported type
/// - `ValidateError::Invalid` with one entry per violating field
pub fn validate(value: &Value) -> ValidateResult {
    let record = value.as_record().ok_or_else(|| SchemaError::NotRecord {
        shape: value.shape().to_string(),
    })?;
    validate_fields(record)
}

/// Validates a caller-owned type through its record view.
pub fn validate_record<T: AsRecord + ?Sized>(value: &T) -> ValidateResult {
    validate_fields(&value.as_record())
}

fn validate_fields(record: &Record) -> ValidateResult {
    match check_record(record)? {
        Some(set) => Err(ValidateError::Invalid(set)),
        None => Ok(()),
    }
}

/// Walks one record level.
fn check_record(record: &Record) -> Result<Option<ValidationErrors>, SchemaError> {
    debug!(
        record = record.type_name().unwrap_or("<anonymous>"),
        fields = record.fields().len(),
        "validating record"
    );

    let mut errors = Vec::new();
    for field in record.fields() {
        if let Some(err) = check_field(field)? {
            errors.push(err);
        }
    }

    let set = ValidationErrors::from_vec(errors);
    debug!(
        record = record.type_name().unwrap_or("<anonymous>"),
        violations = set.as_ref().map_or(0, ValidationErrors::len),
        "record validated"
    );
    Ok(set)
}

fn check_field(field: &Field) -> Result<Option<ValidationError>, SchemaError> {
    let name = field.name.as_str();
    let rule = match field.rule.as_deref() {
        Some(rule) => rule,
        None => {
            trace!(field = name, "no rule, skipped");
            return Ok(None);
        }
    };

    if rule.trim().is_empty() {
        return Err(SchemaError::EmptyRule {
            field: name.to_string(),
        });
    }

    let classified = field.value.classify().ok_or_else(|| SchemaError::UnsupportedType {
        field: name.to_string(),
        shape: field.value.shape().to_string(),
    })?;
    trace!(field = name, class = %classified.class(), "checking field");

    match classified {
        Classified::Nested(nested) => {
            if !is_nested_marker(rule) {
                return Err(SchemaError::NotNested {
                    field: name.to_string(),
                });
            }
            Ok(check_record(nested)?.map(|set| ValidationError::new(name, Cause::Nested(set))))
        }
        Classified::Text(value) => validate_text(name, value, &parse_rule(name, rule)?),
        Classified::Integer(value) => validate_integer(name, value, &parse_rule(name, rule)?),
        Classified::TextList(values) => validate_text_list(name, values, &parse_rule(name, rule)?),
        Classified::IntegerList(values) => {
            validate_integer_list(name, values, &parse_rule(name, rule)?)
        }
    }
}
