//! JSON documents paired with rule sets
//!
//! JSON carries no field metadata, so rules live in a separate rule set
//! file:
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "ID", "rule": "len:36" },
//!     { "name": "Name" },
//!     { "name": "PhysParams", "rule": "nested", "fields": [
//!       { "name": "Age", "rule": "min:18|max:50" }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Field order in the rule set is the declaration order used for
//! validation and reporting.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use thiserror::Error;

use crate::validator::{validate, Field, Record, ValidateResult, Value};

/// Errors while loading a rule set
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("failed to read rule set '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rule set '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate field '{field}' in rule set")]
    DuplicateField { field: String },
}

/// Rule declaration for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub name: String,
    /// Absent means the field is not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Rules of a nested record
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldRule>,
}

impl FieldRule {
    pub fn new(name: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: Some(rule.into()),
            fields: Vec::new(),
        }
    }

    /// Field declared without a rule
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: None,
            fields: Vec::new(),
        }
    }

    /// Nested record field with its own rules
    pub fn nested(name: impl Into<String>, fields: Vec<FieldRule>) -> Self {
        Self {
            name: name.into(),
            rule: Some(crate::validator::NESTED_MARKER.to_string()),
            fields,
        }
    }
}

/// Ordered rule declarations for one record level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub fields: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self { fields }
    }

    /// Loads a rule set from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RuleSetError> {
        let content = fs::read_to_string(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let rules: RuleSet =
            serde_json::from_str(&content).map_err(|source| RuleSetError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        rules.check_structure()?;
        Ok(rules)
    }

    /// Parses a rule set from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, RuleSetError> {
        let rules: RuleSet =
            serde_json::from_str(content).map_err(|source| RuleSetError::Malformed {
                path: PathBuf::from("<in-memory>"),
                source,
            })?;
        rules.check_structure()?;
        Ok(rules)
    }

    /// Rejects duplicate field names at any level.
    pub fn check_structure(&self) -> Result<(), RuleSetError> {
        check_level(&self.fields)
    }

    /// Builds the record view of a document.
    ///
    /// Declared fields come first, in rule set order; a key missing from the
    /// document yields `Value::Null`. Undeclared keys follow as plain fields.
    /// A non-object document converts as a plain value, so validating it
    /// reports that it is not a record.
    pub fn to_value(&self, document: &Json) -> Value {
        match document.as_object() {
            Some(object) => Value::Record(annotate(&self.fields, object)),
            None => plain_value(document),
        }
    }

    /// Validates a document against the rule set.
    pub fn validate_document(&self, document: &Json) -> ValidateResult {
        validate(&self.to_value(document))
    }
}

fn check_level(fields: &[FieldRule]) -> Result<(), RuleSetError> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(RuleSetError::DuplicateField {
                field: field.name.clone(),
            });
        }
        check_level(&field.fields)?;
    }
    Ok(())
}

fn annotate(rules: &[FieldRule], object: &Map<String, Json>) -> Record {
    let mut record = Record::new();

    for rule in rules {
        let value = match object.get(&rule.name) {
            Some(Json::Object(child)) => Value::Record(annotate(&rule.fields, child)),
            Some(other) => plain_value(other),
            None => Value::Null,
        };
        record.push(Field::new(rule.name.as_str(), value, rule.rule.clone()));
    }

    for (key, value) in object {
        if !rules.iter().any(|r| &r.name == key) {
            record.push(Field::new(key.as_str(), plain_value(value), None));
        }
    }

    record
}

/// Converts JSON without rules.
pub fn plain_value(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::Text(s.clone()),
        Json::Array(items) => list_value(items),
        Json::Object(object) => Value::Record(annotate(&[], object)),
    }
}

/// Text lists are tried before integer lists; an empty array is a text list.
fn list_value(items: &[Json]) -> Value {
    let texts: Option<Vec<String>> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect();
    if let Some(texts) = texts {
        return Value::TextList(texts);
    }

    let integers: Option<Vec<i64>> = items.iter().map(Json::as_i64).collect();
    if let Some(integers) = integers {
        return Value::IntegerList(integers);
    }

    Value::Array(items.iter().map(plain_value).collect())
}
