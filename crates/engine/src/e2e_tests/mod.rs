//! End-to-end tests.
//!
//! These run the full engine stack:
//! - In-memory repositories behind the repository ports
//! - Real `jsonschema` validators
//! - Complete App construction with both registries
//!
//! ```bash
//! cargo test -p jsonhub-engine --lib e2e_tests
//! ```

mod e2e_helpers;
mod visibility_tests;

pub use e2e_helpers::*;
