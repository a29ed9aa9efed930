//! Rule string parser
//!
//! Grammar:
//!
//! ```text
//! rule   = clause ("|" clause)*
//! clause = kind ":" argument | "nested"
//! ```
//!
//! Clauses keep declaration order; duplicates are kept and evaluated
//! independently. An argument ends at the next `:`; any text after it is
//! dropped, so patterns cannot contain `:`.

use tracing::debug;

use super::errors::SchemaError;

/// Separator between clauses
pub const CLAUSE_SEPARATOR: char = '|';

/// Separator between kind and argument
pub const ARGUMENT_SEPARATOR: char = ':';

/// The only rule accepted on a nested record field
pub const NESTED_MARKER: &str = "nested";

/// One `kind:argument` unit of a rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause<'a> {
    /// Full clause text as declared
    pub literal: &'a str,
    pub kind: &'a str,
    /// `None` when the clause has no `:`
    pub argument: Option<&'a str>,
}

impl<'a> Clause<'a> {
    fn parse(field: &str, literal: &'a str) -> Result<Self, SchemaError> {
        let mut parts = literal.split(ARGUMENT_SEPARATOR);
        let kind = parts.next().unwrap_or_default();
        if kind.is_empty() {
            return Err(SchemaError::MalformedClause {
                field: field.to_string(),
                clause: literal.to_string(),
            });
        }

        let argument = parts.next();
        if parts.next().is_some() {
            debug!(
                field,
                clause = literal,
                "clause argument truncated at second separator"
            );
        }

        Ok(Self {
            literal,
            kind,
            argument,
        })
    }

    /// Returns the argument, or a schema error when the clause has none.
    pub fn require_argument(&self, field: &str) -> Result<&'a str, SchemaError> {
        self.argument.ok_or_else(|| SchemaError::MalformedClause {
            field: field.to_string(),
            clause: self.literal.to_string(),
        })
    }
}

/// Splits a rule string into clauses.
///
/// `field` is only used to name the field in errors.
///
/// # Errors
///
/// - `EmptyRule` if the rule is blank
/// - `MalformedClause` if a clause is empty or has an empty kind
pub fn parse_rule<'a>(field: &str, rule: &'a str) -> Result<Vec<Clause<'a>>, SchemaError> {
    if rule.trim().is_empty() {
        return Err(SchemaError::EmptyRule {
            field: field.to_string(),
        });
    }

    rule.split(CLAUSE_SEPARATOR)
        .map(|literal| Clause::parse(field, literal))
        .collect()
}

/// Returns true if the rule is exactly the nested marker.
pub fn is_nested_marker(rule: &str) -> bool {
    rule == NESTED_MARKER
}
