//! Field validator for scalar and list fields
//!
//! Scalars run every clause, even after a failure, so all violated clauses
//! are reported. Lists run the scalar check per element. A schema error
//! aborts at once: it concerns the rule, not one value.

use super::errors::{Cause, ElementViolation, SchemaError, ValidationError, Violation};
use super::matchers::{integer_matcher, text_matcher, ArgumentError, PatternCache};
use super::rules::Clause;
use super::types::FieldClass;

fn argument_error(field: &str, clause: &Clause<'_>, argument: &str, err: ArgumentError) -> SchemaError {
    match err {
        ArgumentError::NotInteger => SchemaError::NotInteger {
            field: field.to_string(),
            kind: clause.kind.to_string(),
            argument: argument.to_string(),
        },
        ArgumentError::InvalidPattern(reason) => SchemaError::InvalidPattern {
            field: field.to_string(),
            pattern: argument.to_string(),
            reason,
        },
    }
}

fn unknown_restriction(field: &str, class: FieldClass, clause: &Clause<'_>) -> SchemaError {
    SchemaError::UnknownRestriction {
        field: field.to_string(),
        class,
        kind: clause.kind.to_string(),
    }
}

/// Checks one text value against every clause.
///
/// Returns the violated clause literals in declaration order.
pub fn check_text(
    field: &str,
    value: &str,
    clauses: &[Clause<'_>],
    patterns: &mut PatternCache,
) -> Result<Vec<String>, SchemaError> {
    let mut violated = Vec::new();
    for clause in clauses {
        let matcher = text_matcher(clause.kind)
            .ok_or_else(|| unknown_restriction(field, FieldClass::Text, clause))?;
        let argument = clause.require_argument(field)?;
        let matched =
            matcher(value, argument, patterns).map_err(|e| argument_error(field, clause, argument, e))?;
        if !matched {
            violated.push(clause.literal.to_string());
        }
    }
    Ok(violated)
}

/// Checks one integer value against every clause.
pub fn check_integer(field: &str, value: i64, clauses: &[Clause<'_>]) -> Result<Vec<String>, SchemaError> {
    let mut violated = Vec::new();
    for clause in clauses {
        let matcher = integer_matcher(clause.kind)
            .ok_or_else(|| unknown_restriction(field, FieldClass::Integer, clause))?;
        let argument = clause.require_argument(field)?;
        let matched =
            matcher(value, argument).map_err(|e| argument_error(field, clause, argument, e))?;
        if !matched {
            violated.push(clause.literal.to_string());
        }
    }
    Ok(violated)
}

/// Validates a text field.
pub fn validate_text(
    field: &str,
    value: &str,
    clauses: &[Clause<'_>],
) -> Result<Option<ValidationError>, SchemaError> {
    let violated = check_text(field, value, clauses, &mut PatternCache::new())?;
    if violated.is_empty() {
        return Ok(None);
    }
    Ok(Some(ValidationError::new(
        field,
        Cause::Violation(Violation::new(value, violated)),
    )))
}

/// Validates an integer field.
pub fn validate_integer(
    field: &str,
    value: i64,
    clauses: &[Clause<'_>],
) -> Result<Option<ValidationError>, SchemaError> {
    let violated = check_integer(field, value, clauses)?;
    if violated.is_empty() {
        return Ok(None);
    }
    Ok(Some(ValidationError::new(
        field,
        Cause::Violation(Violation::new(value, violated)),
    )))
}

fn elements_error(field: &str, elements: Vec<ElementViolation>) -> Option<ValidationError> {
    if elements.is_empty() {
        None
    } else {
        Some(ValidationError::new(field, Cause::Elements(elements)))
    }
}

/// Validates every element of a text list.
pub fn validate_text_list(
    field: &str,
    values: &[String],
    clauses: &[Clause<'_>],
) -> Result<Option<ValidationError>, SchemaError> {
    let mut patterns = PatternCache::new();
    let mut elements = Vec::new();
    for (index, value) in values.iter().enumerate() {
        let violated = check_text(field, value, clauses, &mut patterns)?;
        if !violated.is_empty() {
            elements.push(ElementViolation {
                index,
                violation: Violation::new(value.as_str(), violated),
            });
        }
    }
    Ok(elements_error(field, elements))
}

/// Validates every element of an integer list.
pub fn validate_integer_list(
    field: &str,
    values: &[i64],
    clauses: &[Clause<'_>],
) -> Result<Option<ValidationError>, SchemaError> {
    let mut elements = Vec::new();
    for (index, &value) in values.iter().enumerate() {
        let violated = check_integer(field, value, clauses)?;
        if !violated.is_empty() {
            elements.push(ElementViolation {
                index,
                violation: Violation::new(value, violated),
            });
        }
    }
    Ok(elements_error(field, elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::rules::parse_rule;

    #[test]
    fn test_text_passes() {
        let clauses = parse_rule("ID", "len:3|in:abc,def").unwrap();
        assert_eq!(validate_text("ID", "abc", &clauses), Ok(None));
    }

    #[test]
    fn test_text_reports_all_violated_in_order() {
        let clauses = parse_rule("Code", "in:x,y|len:2|regexp:^a|len:5").unwrap();
        let err = validate_text("Code", "abc", &clauses).unwrap().unwrap();
        assert_eq!(err.field, "Code");
        assert_eq!(
            err.cause,
            Cause::Violation(Violation::new("abc", vec!["in:x,y".into(), "len:2".into(), "len:5".into()]))
        );
    }

    #[test]
    fn test_integer_reports_only_failing_clauses() {
        let clauses = parse_rule("Experience", "min:2|max:50").unwrap();
        let err = validate_integer("Experience", 1, &clauses).unwrap().unwrap();
        assert_eq!(
            err.cause,
            Cause::Violation(Violation::new(1i64, vec!["min:2".into()]))
        );
    }

    #[test]
    fn test_unknown_restriction_per_class() {
        let clauses = parse_rule("Shoes", "even:true").unwrap();
        assert_eq!(
            validate_integer("Shoes", 4, &clauses),
            Err(SchemaError::UnknownRestriction {
                field: "Shoes".into(),
                class: FieldClass::Integer,
                kind: "even".into(),
            })
        );

        let clauses = parse_rule("Name", "min:1").unwrap();
        assert!(matches!(
            validate_text("Name", "x", &clauses),
            Err(SchemaError::UnknownRestriction { class: FieldClass::Text, .. })
        ));
    }

    #[test]
    fn test_schema_error_aborts_remaining_clauses() {
        // The first clause fails on data, the second is malformed.
        let clauses = parse_rule("Num", "min:10|max:any").unwrap();
        assert_eq!(
            validate_integer("Num", 1, &clauses),
            Err(SchemaError::NotInteger {
                field: "Num".into(),
                kind: "max".into(),
                argument: "any".into(),
            })
        );
    }

    #[test]
    fn test_missing_argument_is_malformed() {
        let clauses = parse_rule("Name", "len").unwrap();
        assert_eq!(
            validate_text("Name", "x", &clauses),
            Err(SchemaError::MalformedClause {
                field: "Name".into(),
                clause: "len".into(),
            })
        );
    }

    #[test]
    fn test_bad_pattern() {
        let clauses = parse_rule("Email", "regexp:[").unwrap();
        assert!(matches!(
            validate_text("Email", "x", &clauses),
            Err(SchemaError::InvalidPattern { ref pattern, .. }) if pattern == "["
        ));
    }

    #[test]
    fn test_text_list_reports_failing_indices_only() {
        let clauses = parse_rule("Phones", "len:11").unwrap();
        let phones = vec!["89123456789".to_string(), "898765432109".to_string()];
        let err = validate_text_list("Phones", &phones, &clauses).unwrap().unwrap();
        assert_eq!(
            err.cause,
            Cause::Elements(vec![ElementViolation {
                index: 1,
                violation: Violation::new("898765432109", vec!["len:11".into()]),
            }])
        );
    }

    #[test]
    fn test_integer_list_ascending_indices() {
        let clauses = parse_rule("Scores", "min:0|max:10").unwrap();
        let err = validate_integer_list("Scores", &[11, 5, -1, 3], &clauses)
            .unwrap()
            .unwrap();
        match err.cause {
            Cause::Elements(elements) => {
                let indices: Vec<usize> = elements.iter().map(|e| e.index).collect();
                assert_eq!(indices, vec![0, 2]);
                assert_eq!(elements[0].violation.violated, vec!["max:10".to_string()]);
                assert_eq!(elements[1].violation.violated, vec!["min:0".to_string()]);
            }
            other => panic!("unexpected cause: {:?}", other),
        }
    }

    #[test]
    fn test_text_list_shares_compiled_patterns() {
        let clauses = parse_rule("Tags", "regexp:^[a-z]+$|regexp:^a").unwrap();
        let mut patterns = PatternCache::new();
        for tag in ["abc", "Abc", "xyz"] {
            check_text("Tags", tag, &clauses, &mut patterns).unwrap();
        }
        assert_eq!(patterns.len(), 2);
    }

    #[test]
    fn test_duplicate_clauses_evaluated_independently() {
        let clauses = parse_rule("Code", "len:2|len:2").unwrap();
        let err = validate_text("Code", "abc", &clauses).unwrap().unwrap();
        assert_eq!(
            err.cause,
            Cause::Violation(Violation::new("abc", vec!["len:2".into(), "len:2".into()]))
        );
    }

    #[test]
    fn test_empty_list_passes() {
        let clauses = parse_rule("Phones", "len:11").unwrap();
        assert_eq!(validate_text_list("Phones", &[], &clauses), Ok(None));
    }

    #[test]
    fn test_list_schema_error_aborts() {
        let clauses = parse_rule("Nums", "in:1,two").unwrap();
        assert!(validate_integer_list("Nums", &[5, 6], &clauses).is_err());
    }
}
