//! Infrastructure layer module
//!
//! Adapters behind the domain ports:
//! - Configuration loading, schema and the process-wide store
//! - Logging infrastructure
//!
//! The environment is only ever read through the `EnvSource` port.

pub mod config;
pub mod logging;
