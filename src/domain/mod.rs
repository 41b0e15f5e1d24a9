//! Domain layer for the configuration core
//!
//! Setting declarations, the typed configuration model, error taxonomy, and
//! the environment port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ConfigurationError, IssueKind, ParseIssue, ValidationIssue};
