//! Kaiz Core - domain model for the sales visit log
//!
//! This crate provides:
//! - The `Visit` record and its enum-constrained column types
//! - Field maps (`VisitFields`) and the explicit updatable column set (`VisitField`)
//! - Application-boundary validation for create and partial update
//! - The structured error facility (`ExError`, `ExErrorKind`, `VisitError`)
//! - The structured logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Re-exported so the logging macros resolve through `$crate`
pub use kaiz_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, VisitError};
pub use model::{CustomerCategory, FieldKind, FieldValue, Visit, VisitField, VisitFields, YesNo};
