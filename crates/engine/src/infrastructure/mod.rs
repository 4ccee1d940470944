//! Infrastructure implementations.
//!
//! Contains port traits plus the in-memory and `jsonschema` adapters.

pub mod config;
pub mod json_schema;
pub mod memory;
pub mod ports;
