//! Error types for the validation engine
//!
//! Two disjoint families:
//! - `SchemaError`: the rule definition or the field type is invalid. Fatal
//!   to the current call, never aggregated.
//! - `ValidationError` / `ValidationErrors`: the data violates a well-formed
//!   rule. Collected per field and returned as a tree mirroring record nesting.
//!
//! `ValidateError` joins the two so a call yields exactly one of them.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::types::{FieldClass, Scalar};

/// Rule-definition or type-support error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum SchemaError {
    /// The value handed to `validate` is not a record
    #[error("passed value must be a record type, got {shape}")]
    NotRecord { shape: String },

    /// Rule annotation present but blank
    #[error("field '{field}': rule must not be empty")]
    EmptyRule { field: String },

    /// Field shape outside the supported classes
    #[error(
        "field '{field}', type {shape}: unsupported field type; \
         supported: text, text list, integer, integer list, record"
    )]
    UnsupportedType { field: String, shape: String },

    /// Nested record annotated with anything but the nested marker
    #[error("field '{field}': supported rule for nested record is 'nested'")]
    NotNested { field: String },

    /// Restriction kind absent from the field class's table
    #[error("field '{field}', type {class}, restriction '{kind}': unknown restriction for field type")]
    UnknownRestriction {
        field: String,
        class: FieldClass,
        kind: String,
    },

    /// Clause the rule parser cannot split into kind and argument
    #[error("field '{field}': malformed clause '{clause}'")]
    MalformedClause { field: String, clause: String },

    /// Numeric restriction with a non-integer argument
    #[error("field '{field}': value of '{kind}' restriction must be integer, got '{argument}'")]
    NotInteger {
        field: String,
        kind: String,
        argument: String,
    },

    /// Pattern that does not compile
    #[error("field '{field}': invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },
}

impl SchemaError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::NotRecord { .. } => "STRUCTVAL_NOT_RECORD",
            SchemaError::EmptyRule { .. } => "STRUCTVAL_EMPTY_RULE",
            SchemaError::UnsupportedType { .. } => "STRUCTVAL_UNSUPPORTED_TYPE",
            SchemaError::NotNested { .. } => "STRUCTVAL_NOT_NESTED",
            SchemaError::UnknownRestriction { .. } => "STRUCTVAL_UNKNOWN_RESTRICTION",
            SchemaError::MalformedClause { .. } => "STRUCTVAL_MALFORMED_CLAUSE",
            SchemaError::NotInteger { .. } => "STRUCTVAL_NOT_INTEGER_ARGUMENT",
            SchemaError::InvalidPattern { .. } => "STRUCTVAL_INVALID_PATTERN",
        }
    }

    /// Returns the offending field, if the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaError::NotRecord { .. } => None,
            SchemaError::EmptyRule { field }
            | SchemaError::UnsupportedType { field, .. }
            | SchemaError::NotNested { field }
            | SchemaError::UnknownRestriction { field, .. }
            | SchemaError::MalformedClause { field, .. }
            | SchemaError::NotInteger { field, .. }
            | SchemaError::InvalidPattern { field, .. } => Some(field),
        }
    }
}

/// Failing scalar value with the violated clauses, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub value: Scalar,
    pub violated: Vec<String>,
}

impl Violation {
    pub fn new(value: impl Into<Scalar>, violated: Vec<String>) -> Self {
        Self {
            value: value.into(),
            violated,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "violations: val '{}', [{}]", self.value, self.violated.join(", "))
    }
}

/// Violation of one list element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementViolation {
    pub index: usize,
    pub violation: Violation,
}

impl fmt::Display for ElementViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "idx {}: {}", self.index, self.violation)
    }
}

/// Why a field failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Cause {
    /// Scalar field
    Violation(Violation),
    /// List field, ascending by index, failing elements only
    Elements(Vec<ElementViolation>),
    /// Nested record
    Nested(ValidationErrors),
}

/// Data violation of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub cause: Cause,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, cause: Cause) -> Self {
        Self {
            field: field.into(),
            cause,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}field '{}': ", "", self.field, indent = depth * 2)?;
        match &self.cause {
            Cause::Violation(violation) => write!(f, "{}", violation),
            Cause::Elements(elements) => {
                let rendered: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "violations: [{}]", rendered.join("; "))
            }
            Cause::Nested(set) => {
                write!(f, "nested violations:")?;
                for err in set.iter() {
                    writeln!(f)?;
                    err.write_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Non-empty, ordered set of field violations at one record level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps the errors, or returns `None` when there are none.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    /// Looks up the violation reported for `field` at this level.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Outcome of a failed `validate` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// The rules or field types are wrong
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The data violates the rules
    #[error("validation errors:\n{0}")]
    Invalid(ValidationErrors),
}

impl ValidateError {
    pub fn is_schema(&self) -> bool {
        matches!(self, ValidateError::Schema(_))
    }

    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            ValidateError::Schema(err) => Some(err),
            ValidateError::Invalid(_) => None,
        }
    }

    pub fn violations(&self) -> Option<&ValidationErrors> {
        match self {
            ValidateError::Invalid(set) => Some(set),
            ValidateError::Schema(_) => None,
        }
    }
}

/// Result type for validation
pub type ValidateResult = Result<(), ValidateError>;
