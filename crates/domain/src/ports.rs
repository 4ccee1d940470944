//! Validator ports consumed during value construction.
//!
//! Implementations live outside the domain (the engine ships adapters backed
//! by the `jsonschema` crate). Both return the validator's human-readable
//! message on failure; the domain wraps it into the matching `DomainError`.

use crate::value_objects::JsonDocument;

/// Checks that a document is a structurally valid JSON Schema.
#[cfg_attr(test, mockall::automock)]
pub trait JsonSchemaValidator: Send + Sync {
    fn validate_schema(&self, schema: &JsonDocument) -> Result<(), String>;
}

/// Checks that a document conforms to a JSON Schema.
#[cfg_attr(test, mockall::automock)]
pub trait JsonValidator: Send + Sync {
    fn validate(&self, document: &JsonDocument, schema: &JsonDocument) -> Result<(), String>;
}
