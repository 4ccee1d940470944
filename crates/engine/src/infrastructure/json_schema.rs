//! Validator adapters backed by the `jsonschema` crate.

use jsonhub_domain::JsonDocument;

use crate::infrastructure::ports::{JsonSchemaValidator, JsonValidator};

/// Checks schemas against their meta-schema (the draft named by `$schema`,
/// or the crate's default draft).
///
/// Building a validator runs the meta-schema check, so a schema is accepted
/// exactly when it compiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaMetaValidator;

impl JsonSchemaMetaValidator {
    pub fn new() -> Self {
        Self
    }
}

impl JsonSchemaValidator for JsonSchemaMetaValidator {
    fn validate_schema(&self, schema: &JsonDocument) -> Result<(), String> {
        jsonschema::validator_for(schema.value())
            .map(|_| ())
            .map_err(|e| {
                tracing::debug!(error = %e, "Schema rejected by meta-schema");
                e.to_string()
            })
    }
}

/// Validates documents against a schema.
///
/// The schema is compiled per call; all instance errors are reported, joined
/// with `; `.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaDocumentValidator;

impl JsonSchemaDocumentValidator {
    pub fn new() -> Self {
        Self
    }
}

impl JsonValidator for JsonSchemaDocumentValidator {
    fn validate(&self, document: &JsonDocument, schema: &JsonDocument) -> Result<(), String> {
        let validator = jsonschema::validator_for(schema.value())
            .map_err(|e| format!("schema could not be compiled: {e}"))?;

        let errors: Vec<String> = validator
            .iter_errors(document.value())
            .map(|e| e.to_string())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }
}
