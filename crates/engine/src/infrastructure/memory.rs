//! In-memory repositories.
//!
//! A single store implements both repository ports so definition/entity
//! relations (usage counts, children) can be answered from one place.
//! Records keep insertion order. Nothing is persisted.

use std::sync::Arc;

use async_trait::async_trait;
use jsonhub_domain::{
    Definition, DefinitionId, DefinitionValues, Entity, EntityId, EntityValues, FilterCriteria,
    JsonSchemaDocument, ParentFilter, Slug, UserId,
};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{DefinitionRepo, EntityRepo, RepoError};

#[derive(Default)]
struct Store {
    definitions: Vec<Definition>,
    entities: Vec<Entity>,
}

/// Shared in-memory store. Cloning shares the same underlying data.
#[derive(Clone, Default)]
pub struct InMemoryRepositories {
    store: Arc<RwLock<Store>>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a root definition (bootstrap only).
    pub async fn seed_root_definition(
        &self,
        slug: Option<Slug>,
        data: JsonSchemaDocument,
        owner: UserId,
    ) -> Definition {
        let definition = Definition::root(DefinitionId::new(), slug, data, owner);
        self.store.write().await.definitions.push(definition.clone());
        tracing::info!(definition_id = %definition.id(), owner = %owner, "Seeded root definition");
        definition
    }
}

// =============================================================================
// Matching
// =============================================================================

fn matches_search(search: Option<&str>, slug: Option<&Slug>, body: &str) -> bool {
    match search {
        None => true,
        Some(needle) => {
            slug.is_some_and(|s| s.as_str().contains(needle)) || body.contains(needle)
        }
    }
}

fn matches_slug(filter: Option<&str>, slug: Option<&Slug>) -> bool {
    filter.map_or(true, |wanted| slug.is_some_and(|s| s.as_str() == wanted))
}

fn matches_parent(filter: Option<ParentFilter>, parent: Option<EntityId>) -> bool {
    match filter {
        None => true,
        Some(ParentFilter::Root) => parent.is_none(),
        Some(ParentFilter::Entity(id)) => parent == Some(id),
    }
}

fn definition_matches(criteria: &FilterCriteria, definition: &Definition) -> bool {
    matches_search(criteria.search(), definition.slug(), definition.data().as_str())
        && matches_slug(criteria.slug(), definition.slug())
        && criteria.definition().map_or(true, |id| id == definition.id())
        && matches_parent(criteria.parent(), definition.parent().map(|p| p.id()))
        && criteria.owner().map_or(true, |owner| definition.is_owned_by(owner))
}

fn entity_matches(criteria: &FilterCriteria, entity: &Entity) -> bool {
    matches_search(criteria.search(), entity.slug(), entity.data().as_str())
        && matches_slug(criteria.slug(), entity.slug())
        && criteria
            .definition()
            .map_or(true, |id| id == entity.definition().id())
        && matches_parent(criteria.parent(), entity.parent().map(|p| p.id()))
        && criteria.owner().map_or(true, |owner| entity.is_owned_by(owner))
        && criteria.private().map_or(true, |p| p == entity.is_private())
}

fn page<T>(items: impl Iterator<Item = T>, criteria: &FilterCriteria) -> Vec<T> {
    items
        .skip(criteria.offset() as usize)
        .take(criteria.limit() as usize)
        .collect()
}

// =============================================================================
// DefinitionRepo
// =============================================================================

#[async_trait]
impl DefinitionRepo for InMemoryRepositories {
    async fn create(&self, values: DefinitionValues) -> Result<Definition, RepoError> {
        let mut store = self.store.write().await;
        if let Some(parent) = values.parent() {
            if !store.entities.iter().any(|e| e.id() == parent.id()) {
                return Err(RepoError::not_found("Entity", parent.id()));
            }
        }
        let definition = Definition::from_values(DefinitionId::new(), values);
        store.definitions.push(definition.clone());
        Ok(definition)
    }

    async fn read(&self, id: DefinitionId) -> Result<Option<Definition>, RepoError> {
        let store = self.store.read().await;
        Ok(store.definitions.iter().find(|d| d.id() == id).cloned())
    }

    async fn update(&self, definition: &Definition) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .definitions
            .iter_mut()
            .find(|d| d.id() == definition.id())
            .ok_or_else(|| RepoError::not_found("Definition", definition.id()))?;
        *slot = definition.clone();
        Ok(())
    }

    async fn delete(&self, definition: &Definition) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.definitions.len();
        store.definitions.retain(|d| d.id() != definition.id());
        if store.definitions.len() == before {
            return Err(RepoError::not_found("Definition", definition.id()));
        }
        Ok(())
    }

    async fn read_all(&self, criteria: &FilterCriteria) -> Result<Vec<Definition>, RepoError> {
        let store = self.store.read().await;
        Ok(page(
            store
                .definitions
                .iter()
                .filter(|d| definition_matches(criteria, d))
                .cloned(),
            criteria,
        ))
    }

    async fn count(&self, criteria: &FilterCriteria) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .definitions
            .iter()
            .filter(|d| definition_matches(criteria, d))
            .count() as u64)
    }
}

// =============================================================================
// EntityRepo
// =============================================================================

#[async_trait]
impl EntityRepo for InMemoryRepositories {
    async fn create(&self, values: EntityValues) -> Result<Entity, RepoError> {
        let mut store = self.store.write().await;
        let definition_id = values.definition().id();
        if !store.definitions.iter().any(|d| d.id() == definition_id) {
            return Err(RepoError::not_found("Definition", definition_id));
        }
        if let Some(parent) = values.parent() {
            if !store.entities.iter().any(|e| e.id() == parent.id()) {
                return Err(RepoError::not_found("Entity", parent.id()));
            }
        }
        let entity = Entity::from_values(EntityId::new(), values);
        store.entities.push(entity.clone());
        Ok(entity)
    }

    async fn read(&self, id: EntityId) -> Result<Option<Entity>, RepoError> {
        let store = self.store.read().await;
        Ok(store.entities.iter().find(|e| e.id() == id).cloned())
    }

    async fn update(&self, entity: &Entity) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .entities
            .iter_mut()
            .find(|e| e.id() == entity.id())
            .ok_or_else(|| RepoError::not_found("Entity", entity.id()))?;
        *slot = entity.clone();
        Ok(())
    }

    async fn delete(&self, entity: &Entity) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.entities.len();
        store.entities.retain(|e| e.id() != entity.id());
        if store.entities.len() == before {
            return Err(RepoError::not_found("Entity", entity.id()));
        }
        Ok(())
    }

    async fn read_all(&self, criteria: &FilterCriteria) -> Result<Vec<Entity>, RepoError> {
        let store = self.store.read().await;
        Ok(page(
            store
                .entities
                .iter()
                .filter(|e| entity_matches(criteria, e))
                .cloned(),
            criteria,
        ))
    }

    async fn count(&self, criteria: &FilterCriteria) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .entities
            .iter()
            .filter(|e| entity_matches(criteria, e))
            .count() as u64)
    }

    async fn count_children(&self, entity: &Entity) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        let id = entity.id();
        let entities = store
            .entities
            .iter()
            .filter(|e| e.parent().is_some_and(|p| p.id() == id))
            .count();
        let definitions = store
            .definitions
            .iter()
            .filter(|d| d.parent().is_some_and(|p| p.id() == id))
            .count();
        Ok((entities + definitions) as u64)
    }
}
