//! structval - declarative validation of structured records
//!
//! Fields carry compact rule strings (`len:36`, `min:18|max:50`,
//! `regexp:^\w+$`, `in:admin,staff`, `nested`); the engine verifies every
//! annotated field and reports all violations as a tree mirroring the record.

pub mod cli;
pub mod config;
pub mod document;
pub mod logging;
pub mod validator;
