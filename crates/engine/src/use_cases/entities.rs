//! Entity registry.
//!
//! Reads honour privacy: private entities are only visible to their owner, and
//! list queries are narrowed to public entities unless the requester asks for
//! their own.

use std::sync::Arc;

use jsonhub_domain::{
    Definition, DefinitionId, DomainError, Entity, EntityChanges, EntityId, EntityPatch,
    EntityRef, EntityValues, FilterCriteria, JsonDocument, Slug, UserId, ValuesFactory,
};
use tracing::instrument;

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::{DefinitionRepo, EntityRepo};

use super::RegistryError;

pub struct EntityRegistry {
    entities: Arc<dyn EntityRepo>,
    definitions: Arc<dyn DefinitionRepo>,
    values: Arc<ValuesFactory>,
    max_page_size: u32,
}

impl EntityRegistry {
    pub fn new(
        entities: Arc<dyn EntityRepo>,
        definitions: Arc<dyn DefinitionRepo>,
        values: Arc<ValuesFactory>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            entities,
            definitions,
            values,
            max_page_size: config.max_page_size,
        }
    }

    /// Fetch an entity if it exists and is visible to `requester`.
    ///
    /// # Errors
    ///
    /// `RegistryError::PrivateAccessDenied` if the entity is private and
    /// `requester` is not its owner.
    pub async fn get_entity(
        &self,
        id: EntityId,
        requester: Option<UserId>,
    ) -> Result<Option<Entity>, RegistryError> {
        match self.entities.read(id).await? {
            Some(entity) if !entity.is_visible_to(requester) => {
                tracing::debug!(entity_id = %id, "Private entity hidden from requester");
                Err(RegistryError::PrivateAccessDenied(format!(
                    "entity {id} is private"
                )))
            }
            found => Ok(found),
        }
    }

    pub async fn get_entities(
        &self,
        criteria: &FilterCriteria,
        requester: Option<UserId>,
    ) -> Result<Vec<Entity>, RegistryError> {
        let criteria = self.scoped(criteria, requester)?;
        Ok(self.entities.read_all(&criteria).await?)
    }

    pub async fn count_entities(
        &self,
        criteria: &FilterCriteria,
        requester: Option<UserId>,
    ) -> Result<u64, RegistryError> {
        let criteria = self.scoped(criteria, requester)?;
        Ok(self.entities.count(&criteria).await?)
    }

    /// Persist values built by the values factory.
    ///
    /// The parent and the definition are re-read first. The data is checked
    /// again against the stored definition schema, which may be newer than
    /// the snapshot the values were built with.
    #[instrument(skip_all, fields(owner = %values.owner()))]
    pub async fn add_entity(&self, values: EntityValues) -> Result<Entity, RegistryError> {
        if let Some(parent) = values.parent() {
            let stored = self.parent_ref(parent.id()).await?;
            if stored.owner() != values.owner() {
                tracing::warn!(parent_id = %parent.id(), "Parent belongs to another user");
                return Err(DomainError::ParentOwnerMismatch.into());
            }
        }
        let definition = self.load_definition(values.definition().id()).await?;
        let values = self.values.rebase_entity(&values, definition)?;

        let entity = self.entities.create(values).await?;
        tracing::debug!(entity_id = %entity.id(), "Entity created");
        Ok(entity)
    }

    /// Parse a raw patch object and apply it.
    ///
    /// Keys other than `slug`, `data`, `parent` and `private` fail with
    /// `RegistryError::InvalidArgument` before anything is loaded.
    pub async fn update_entity_from_json(
        &self,
        user: UserId,
        id: EntityId,
        patch: serde_json::Value,
    ) -> Result<Entity, RegistryError> {
        let patch = EntityPatch::from_json(patch)
            .map_err(|e| RegistryError::InvalidArgument(e.to_string()))?;
        self.update_entity(user, id, patch).await
    }

    /// Apply a partial update, re-validating the whole value set (including
    /// the data against the stored definition schema) before anything is
    /// written.
    #[instrument(skip_all, fields(entity_id = %id, user_id = %user))]
    pub async fn update_entity(
        &self,
        user: UserId,
        id: EntityId,
        patch: EntityPatch,
    ) -> Result<Entity, RegistryError> {
        let mut entity = self.load(id).await?;
        ensure_owner(&entity, user)?;

        let mut input = entity.export();
        input.definition = Some(self.load_definition(entity.definition().id()).await?);
        let current = self.values.create_entity(input)?;
        let changes = self.resolve_changes(id, patch).await?;
        let updated = self.values.revise_entity(&current, changes)?;

        entity.apply(updated)?;
        self.entities.update(&entity).await?;
        tracing::debug!("Entity updated");
        Ok(entity)
    }

    /// Delete an entity that has no child entities or definitions.
    #[instrument(skip_all, fields(entity_id = %id, user_id = %user))]
    pub async fn remove_entity(&self, user: UserId, id: EntityId) -> Result<(), RegistryError> {
        let entity = self.load(id).await?;
        ensure_owner(&entity, user)?;

        let children = self.entities.count_children(&entity).await?;
        if children > 0 {
            tracing::warn!(children, "Refusing to remove an entity with children");
            return Err(RegistryError::HasChildren(id));
        }

        self.entities.delete(&entity).await?;
        tracing::debug!("Entity removed");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Apply the visibility rules to a list query.
    fn scoped(
        &self,
        criteria: &FilterCriteria,
        requester: Option<UserId>,
    ) -> Result<FilterCriteria, RegistryError> {
        if criteria.private() == Some(true) && requester.is_none() {
            return Err(RegistryError::PrivateAccessDenied(
                "listing private entities requires a user".to_string(),
            ));
        }
        if let Some(owner) = criteria.owner() {
            if requester != Some(owner) {
                return Err(RegistryError::ForbiddenFilter(format!(
                    "cannot filter by owner {owner}"
                )));
            }
        }

        let scoped = criteria.clone().with_limit_cap(self.max_page_size);
        // Owner filters are the requester's own entities at this point.
        if criteria.private().is_none() && criteria.owner().is_none() {
            Ok(scoped.public_only())
        } else {
            Ok(scoped)
        }
    }

    async fn load(&self, id: EntityId) -> Result<Entity, RegistryError> {
        self.entities
            .read(id)
            .await?
            .ok_or_else(|| RegistryError::not_found("Entity", id))
    }

    async fn load_definition(&self, id: DefinitionId) -> Result<Definition, RegistryError> {
        self.definitions
            .read(id)
            .await?
            .ok_or_else(|| RegistryError::not_found("Definition", id))
    }

    async fn resolve_changes(
        &self,
        id: EntityId,
        patch: EntityPatch,
    ) -> Result<EntityChanges, RegistryError> {
        let parent = match patch.parent {
            Some(Some(parent_id)) if parent_id == id => {
                return Err(RegistryError::InvalidArgument(
                    "an entity cannot be its own parent".to_string(),
                ));
            }
            Some(Some(parent_id)) => Some(Some(self.parent_ref(parent_id).await?)),
            Some(None) => Some(None),
            None => None,
        };
        Ok(EntityChanges {
            slug: patch.slug.map(Slug::parse_optional).transpose()?,
            data: patch.data.map(JsonDocument::parse).transpose()?,
            parent,
            private: patch.private,
        })
    }

    async fn parent_ref(&self, id: EntityId) -> Result<EntityRef, RegistryError> {
        self.entities
            .read(id)
            .await?
            .map(|entity| entity.as_parent())
            .ok_or_else(|| RegistryError::not_found("Entity", id))
    }
}

fn ensure_owner(entity: &Entity, user: UserId) -> Result<(), RegistryError> {
    if entity.is_owned_by(user) {
        Ok(())
    } else {
        tracing::warn!("User is not the owner of the entity");
        Err(RegistryError::not_owner("Entity", entity.id(), user))
    }
}
