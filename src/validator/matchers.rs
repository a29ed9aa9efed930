//! Restriction matchers
//!
//! One pure predicate per (field class, restriction kind). The tables are
//! `const` and never change at runtime, so lookups need no synchronisation.
//!
//! A matcher returns `Ok(true)` when the value satisfies the restriction,
//! `Ok(false)` when it does not, and `Err` when the argument itself is
//! malformed for that kind.
//!
//! Text matchers share a `PatternCache` so a `regexp:` pattern is compiled
//! once per field, not once per list element.

use std::collections::HashMap;

use regex::Regex;

/// Restriction kind: exact code-point length of text
pub const LEN: &str = "len";
/// Restriction kind: text contains a match of the pattern
pub const REGEXP: &str = "regexp";
/// Restriction kind: value equals one comma-separated entry
pub const IN: &str = "in";
/// Restriction kind: integer lower bound, inclusive
pub const MIN: &str = "min";
/// Restriction kind: integer upper bound, inclusive
pub const MAX: &str = "max";

/// Malformed restriction argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    NotInteger,
    InvalidPattern(String),
}

pub type TextMatcher = fn(&str, &str, &mut PatternCache) -> Result<bool, ArgumentError>;
pub type IntegerMatcher = fn(i64, &str) -> Result<bool, ArgumentError>;

/// Matchers for text values
pub const TEXT_MATCHERS: &[(&str, TextMatcher)] = &[
    (LEN, text_len),
    (REGEXP, text_regexp),
    (IN, text_in),
];

/// Matchers for integer values
pub const INTEGER_MATCHERS: &[(&str, IntegerMatcher)] = &[
    (MIN, integer_min),
    (MAX, integer_max),
    (IN, integer_in),
];

pub fn text_matcher(kind: &str) -> Option<TextMatcher> {
    TEXT_MATCHERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, m)| *m)
}

pub fn integer_matcher(kind: &str) -> Option<IntegerMatcher> {
    INTEGER_MATCHERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, m)| *m)
}

/// Compiled `regexp:` patterns, keyed by pattern text.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: HashMap<String, Regex>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct patterns compiled so far
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn is_match(&mut self, value: &str, pattern: &str) -> Result<bool, ArgumentError> {
        if let Some(re) = self.patterns.get(pattern) {
            return Ok(re.is_match(value));
        }
        let re = Regex::new(pattern).map_err(|e| ArgumentError::InvalidPattern(e.to_string()))?;
        let matched = re.is_match(value);
        self.patterns.insert(pattern.to_string(), re);
        Ok(matched)
    }
}

fn parse_integer(argument: &str) -> Result<i64, ArgumentError> {
    argument.parse::<i64>().map_err(|_| ArgumentError::NotInteger)
}

fn text_len(value: &str, argument: &str, _: &mut PatternCache) -> Result<bool, ArgumentError> {
    let expected = parse_integer(argument)?;
    Ok(i64::try_from(value.chars().count()) == Ok(expected))
}

fn text_regexp(value: &str, argument: &str, patterns: &mut PatternCache) -> Result<bool, ArgumentError> {
    patterns.is_match(value, argument)
}

fn text_in(value: &str, argument: &str, _: &mut PatternCache) -> Result<bool, ArgumentError> {
    Ok(argument.split(',').any(|entry| entry == value))
}

fn integer_min(value: i64, argument: &str) -> Result<bool, ArgumentError> {
    Ok(value >= parse_integer(argument)?)
}

fn integer_max(value: i64, argument: &str) -> Result<bool, ArgumentError> {
    Ok(value <= parse_integer(argument)?)
}

/// Every entry must be an integer, even after a match is found.
fn integer_in(value: i64, argument: &str) -> Result<bool, ArgumentError> {
    let mut matched = false;
    for entry in argument.split(',') {
        matched |= parse_integer(entry)? == value;
    }
    Ok(matched)
}
