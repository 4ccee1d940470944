//! Application state and composition.

use std::sync::Arc;

use jsonhub_domain::{FilterCriteria, FilterCriteriaBuilder, ValuesFactory};

use crate::infrastructure::{
    config::EngineConfig,
    json_schema::{JsonSchemaDocumentValidator, JsonSchemaMetaValidator},
    memory::InMemoryRepositories,
    ports::{DefinitionRepo, EntityRepo, JsonSchemaValidator, JsonValidator},
};
use crate::use_cases::{DefinitionRegistry, EntityRegistry};

/// Main application state.
///
/// Holds the values factory and both registries. The factory is shared so
/// callers build creation values with the same validators the registries use.
pub struct App {
    pub values: Arc<ValuesFactory>,
    pub definitions: DefinitionRegistry,
    pub entities: EntityRegistry,
    pub config: EngineConfig,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        definition_repo: Arc<dyn DefinitionRepo>,
        entity_repo: Arc<dyn EntityRepo>,
        schema_validator: Arc<dyn JsonSchemaValidator>,
        json_validator: Arc<dyn JsonValidator>,
        config: EngineConfig,
    ) -> Self {
        let values = Arc::new(ValuesFactory::new(json_validator, schema_validator));

        let definitions = DefinitionRegistry::new(
            definition_repo.clone(),
            entity_repo.clone(),
            values.clone(),
            &config,
        );
        let entities = EntityRegistry::new(entity_repo, definition_repo, values.clone(), &config);

        tracing::info!(
            default_page_size = config.default_page_size,
            max_page_size = config.max_page_size,
            "Engine composed"
        );

        Self {
            values,
            definitions,
            entities,
            config,
        }
    }

    /// Compose over a fresh in-memory store with the `jsonschema` validators.
    ///
    /// The store handle is returned alongside so root definitions can be
    /// seeded.
    pub fn in_memory(config: EngineConfig) -> (Self, InMemoryRepositories) {
        let store = InMemoryRepositories::new();
        let app = Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(JsonSchemaMetaValidator::new()),
            Arc::new(JsonSchemaDocumentValidator::new()),
            config,
        );
        (app, store)
    }

    /// Start a filter with the configured default page size.
    pub fn criteria(&self) -> FilterCriteriaBuilder {
        FilterCriteria::builder_with_limit(self.config.default_page_size)
    }
}
