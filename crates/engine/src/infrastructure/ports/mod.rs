//! Port traits for infrastructure boundaries.
//!
//! Repositories are the only async boundary of the engine. Validator ports
//! are synchronous and live in `jsonhub_domain::ports`, since value
//! construction itself depends on them.

mod error;
mod repos;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{DefinitionRepo, EntityRepo};

// =============================================================================
// Validator Ports (re-exported for adapters)
// =============================================================================
pub use jsonhub_domain::ports::{JsonSchemaValidator, JsonValidator};

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockDefinitionRepo, MockEntityRepo};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
