//! Record model and field type classification
//!
//! Supported field classes:
//! - text: UTF-8 string
//! - text list: ordered list of strings
//! - integer: 64-bit signed integer
//! - integer list: ordered list of 64-bit signed integers
//! - nested: a record of its own
//!
//! Every other shape (bool, float, map, heterogeneous array, null) is carried
//! by `Value` so it can be reported, but classifies as unsupported.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Runtime value of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    TextList(Vec<String>),
    Integer(i64),
    IntegerList(Vec<i64>),
    Record(Record),
    Bool(bool),
    Float(f64),
    Map(BTreeMap<String, Value>),
    /// Heterogeneous list
    Array(Vec<Value>),
    Null,
}

impl Value {
    /// Returns the shape name used in error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::TextList(_) => "text list",
            Value::Integer(_) => "integer",
            Value::IntegerList(_) => "integer list",
            Value::Record(_) => "record",
            Value::Bool(_) => "bool",
            Value::Float(_) => "float",
            Value::Map(_) => "map",
            Value::Array(_) => "array",
            Value::Null => "null",
        }
    }

    /// Classifies the value, or returns `None` for unsupported shapes.
    pub fn classify(&self) -> Option<Classified<'_>> {
        match self {
            Value::TextList(values) => Some(Classified::TextList(values)),
            Value::IntegerList(values) => Some(Classified::IntegerList(values)),
            Value::Text(value) => Some(Classified::Text(value)),
            Value::Integer(value) => Some(Classified::Integer(*value)),
            Value::Record(record) => Some(Classified::Nested(record)),
            Value::Bool(_)
            | Value::Float(_)
            | Value::Map(_)
            | Value::Array(_)
            | Value::Null => None,
        }
    }

    pub fn class(&self) -> Option<FieldClass> {
        self.classify().map(|classified| classified.class())
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::TextList(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::TextList(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::IntegerList(v)
    }
}

impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self {
        Value::IntegerList(v.into_iter().map(i64::from).collect())
    }
}

macro_rules! integer_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

/// One of the five supported field classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldClass {
    Text,
    TextList,
    Integer,
    IntegerList,
    Nested,
}

impl FieldClass {
    /// Returns the class name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldClass::Text => "text",
            FieldClass::TextList => "text list",
            FieldClass::Integer => "integer",
            FieldClass::IntegerList => "integer list",
            FieldClass::Nested => "record",
        }
    }
}

impl fmt::Display for FieldClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of a value of a supported class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified<'a> {
    Text(&'a str),
    TextList(&'a [String]),
    Integer(i64),
    IntegerList(&'a [i64]),
    Nested(&'a Record),
}

impl Classified<'_> {
    pub fn class(&self) -> FieldClass {
        match self {
            Classified::Text(_) => FieldClass::Text,
            Classified::TextList(_) => FieldClass::TextList,
            Classified::Integer(_) => FieldClass::Integer,
            Classified::IntegerList(_) => FieldClass::IntegerList,
            Classified::Nested(_) => FieldClass::Nested,
        }
    }
}

/// Scalar embedded in a violation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Integer(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Integer(i64::from(v))
    }
}

/// A named field with its value and optional rule annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
    /// `None` means the field is not validated at all
    pub rule: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, rule: Option<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            rule,
        }
    }
}

/// Structured value with ordered, named fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    type_name: Option<String>,
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record carrying the name of the type it was built from
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            fields: Vec::new(),
        }
    }

    /// Appends a field with a rule annotation.
    pub fn annotated(
        mut self,
        name: impl Into<String>,
        rule: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.fields.push(Field::new(name, value, Some(rule.into())));
        self
    }

    /// Appends a field without a rule annotation.
    pub fn plain(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(Field::new(name, value, None));
        self
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Exposes a caller-owned type as a record with rule annotations.
pub trait AsRecord {
    fn as_record(&self) -> Record;
}

impl AsRecord for Record {
    fn as_record(&self) -> Record {
        self.clone()
    }
}
