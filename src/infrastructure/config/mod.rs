//! Configuration management infrastructure
//!
//! Environment-driven configuration:
//! - Closed schema of recognised settings
//! - Typed coercion with declared defaults
//! - Exhaustive validation
//! - Lazily resolved, process-wide store

pub mod env;
pub mod loader;
pub mod schema;
pub mod store;

pub use env::{MapEnv, ProcessEnv};
pub use loader::{ConfigLoader, Resolution, ValueSource};
pub use schema::{DocRow, Schema, SETTINGS};
pub use store::{get, global, install, is_feature_enabled, load, validate, ConfigStore, LoadState};
