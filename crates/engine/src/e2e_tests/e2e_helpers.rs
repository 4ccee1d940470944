//! E2E test helpers for constructing the full application stack.

use jsonhub_domain::{
    Definition, DefinitionInput, Entity, EntityInput, JsonDocument, JsonSchemaDocument, UserId,
};

use crate::app::App;
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::json_schema::JsonSchemaMetaValidator;
use crate::test_fixtures::init_tracing;

/// An in-memory App with one root definition owned by `owner`.
pub struct E2EContext {
    pub app: App,
    pub root: Definition,
    pub owner: UserId,
}

impl E2EContext {
    pub async fn new() -> Self {
        init_tracing();
        let (app, store) = App::in_memory(EngineConfig::default());
        let owner = UserId::new();
        let root = store
            .seed_root_definition(None, schema("{}"), owner)
            .await;
        Self {
            app,
            root,
            owner,
        }
    }

    /// Create an entity through the factory and registry.
    pub async fn add_entity(&self, input: EntityInput) -> Entity {
        let values = self.app.values.create_entity(input).unwrap();
        self.app.entities.add_entity(values).await.unwrap()
    }

    /// Create a definition through the factory and registry.
    pub async fn add_definition(&self, input: DefinitionInput) -> Definition {
        let values = self.app.values.create_definition(input).unwrap();
        self.app.definitions.add_definition(values).await.unwrap()
    }
}

pub fn schema(raw: &str) -> JsonSchemaDocument {
    JsonSchemaDocument::new(JsonDocument::parse(raw).unwrap(), &JsonSchemaMetaValidator::new())
        .unwrap()
}
