//! Common test helpers: validator stand-ins, factories and records.

use std::sync::{Arc, Once};

use jsonhub_domain::{
    Definition, DefinitionId, DefinitionInput, DefinitionValues, Entity, EntityId, EntityInput,
    EntityRef, JsonDocument, UserId, ValuesFactory,
};

use crate::infrastructure::ports::{JsonSchemaValidator, JsonValidator};

// =============================================================================
// Validators
// =============================================================================

/// Accepts every schema and every document.
pub struct AcceptAll;

impl JsonSchemaValidator for AcceptAll {
    fn validate_schema(&self, _schema: &JsonDocument) -> Result<(), String> {
        Ok(())
    }
}

impl JsonValidator for AcceptAll {
    fn validate(&self, _document: &JsonDocument, _schema: &JsonDocument) -> Result<(), String> {
        Ok(())
    }
}

/// Rejects every document with a fixed message.
pub struct RejectDocuments(pub &'static str);

impl JsonValidator for RejectDocuments {
    fn validate(&self, _document: &JsonDocument, _schema: &JsonDocument) -> Result<(), String> {
        Err(self.0.to_string())
    }
}

pub fn accept_all_factory() -> ValuesFactory {
    ValuesFactory::new(Arc::new(AcceptAll), Arc::new(AcceptAll))
}

// =============================================================================
// Records
// =============================================================================

pub fn user() -> UserId {
    UserId::new()
}

pub fn root_definition(owner: UserId) -> Definition {
    let schema = accept_all_factory()
        .create_json_schema("{}")
        .expect("fixture schema");
    Definition::root(DefinitionId::new(), None, schema, owner)
}

/// An entity owned by `owner` against `definition`, optionally private.
pub fn entity(owner: UserId, definition: &Definition, private: bool) -> Entity {
    let values = accept_all_factory()
        .create_entity(EntityInput::new(owner, definition.clone(), "{}").with_private(private))
        .expect("fixture entity");
    Entity::from_values(EntityId::new(), values)
}

/// A child definition nested under a fresh entity owned by `owner`.
pub fn child_definition(owner: UserId, data: &str) -> Definition {
    let parent = entity(owner, &root_definition(owner), false);
    Definition::from_values(
        DefinitionId::new(),
        definition_values(owner, parent.as_parent(), data),
    )
}

pub fn definition_values(owner: UserId, parent: EntityRef, data: &str) -> DefinitionValues {
    accept_all_factory()
        .create_definition(DefinitionInput::new(owner, parent, data))
        .expect("fixture definition values")
}

// =============================================================================
// Logging
// =============================================================================

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness (`RUST_LOG` filters it).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "jsonhub_engine=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}
