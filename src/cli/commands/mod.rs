//! CLI command implementations.

pub mod check;
pub mod docs;
pub mod flag;
pub mod show;
