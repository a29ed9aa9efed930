//! Declarative validation engine
//!
//! Records carry per-field rule strings such as `min:18|max:50`. The engine
//! checks every annotated field and reports all violations, not just the
//! first one.
//!
//! # Guarantees
//!
//! - A call yields no error, one `SchemaError`, or one non-empty
//!   `ValidationErrors`, never a mix
//! - Fields are checked in declaration order; violated clauses keep rule order
//! - Nested violations are reported as a tree, not flattened
//! - No shared mutable state: calls may run concurrently
//!
//! # Usage
//!
//! ```
//! use structval::validator::{validate, Record};
//!
//! let user = Record::named("User")
//!     .annotated("ID", "len:36", "d56e42f5")
//!     .plain("Name", "John");
//!
//! let err = validate(&user.into()).unwrap_err();
//! assert_eq!(err.violations().unwrap().len(), 1);
//! ```

mod engine;
mod errors;
mod field;
mod matchers;
mod rules;
mod types;

pub use engine::{validate, validate_record};
pub use errors::{
    Cause, ElementViolation, SchemaError, ValidateError, ValidateResult, ValidationError,
    ValidationErrors, Violation,
};
pub use matchers::{IN, LEN, MAX, MIN, REGEXP};
pub use rules::{parse_rule, Clause, NESTED_MARKER};
pub use types::{AsRecord, Classified, Field, FieldClass, Record, Scalar, Value};
