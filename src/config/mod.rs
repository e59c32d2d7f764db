//! Configuration model for safechain.
//!
//! This module defines the Config struct that represents `safechain.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! defaults for every field, environment overrides and validation.

mod model;
mod operations;


// Re-export public API
pub use model::Config;
