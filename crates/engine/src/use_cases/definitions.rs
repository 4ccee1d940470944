//! Definition registry.
//!
//! Orchestrates the definition lifecycle: ownership checks, schema reuse
//! guards and reconstruct-then-validate updates. The repository `update` or
//! `delete` call is the only side effect and runs after every check passed.

use std::sync::Arc;

use jsonhub_domain::{
    Definition, DefinitionChanges, DefinitionId, DefinitionPatch, DefinitionValues, DomainError,
    EntityId, EntityRef, FilterCriteria, Slug, UserId, ValuesFactory,
};
use tracing::instrument;

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::{DefinitionRepo, EntityRepo};

use super::RegistryError;

pub struct DefinitionRegistry {
    definitions: Arc<dyn DefinitionRepo>,
    entities: Arc<dyn EntityRepo>,
    values: Arc<ValuesFactory>,
    max_page_size: u32,
}

impl DefinitionRegistry {
    pub fn new(
        definitions: Arc<dyn DefinitionRepo>,
        entities: Arc<dyn EntityRepo>,
        values: Arc<ValuesFactory>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            definitions,
            entities,
            values,
            max_page_size: config.max_page_size,
        }
    }

    pub async fn get_definition(
        &self,
        id: DefinitionId,
    ) -> Result<Option<Definition>, RegistryError> {
        Ok(self.definitions.read(id).await?)
    }

    pub async fn get_definitions(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<Definition>, RegistryError> {
        let criteria = criteria.clone().with_limit_cap(self.max_page_size);
        Ok(self.definitions.read_all(&criteria).await?)
    }

    pub async fn count_definitions(&self, criteria: &FilterCriteria) -> Result<u64, RegistryError> {
        Ok(self.definitions.count(criteria).await?)
    }

    /// Persist values built by the values factory.
    ///
    /// The parent is re-read first: a parent that no longer exists fails with
    /// `RegistryError::NotFound`, one held by another user with
    /// `DomainError::ParentMismatch`.
    #[instrument(skip_all, fields(owner = %values.owner()))]
    pub async fn add_definition(
        &self,
        values: DefinitionValues,
    ) -> Result<Definition, RegistryError> {
        if let Some(parent) = values.parent() {
            let stored = self.parent_ref(parent.id()).await?;
            if stored.owner() != values.owner() {
                tracing::warn!(parent_id = %parent.id(), "Parent belongs to another user");
                return Err(DomainError::ParentMismatch.into());
            }
        }

        let definition = self.definitions.create(values).await?;
        tracing::debug!(definition_id = %definition.id(), "Definition created");
        Ok(definition)
    }

    /// Parse a raw patch object and apply it.
    ///
    /// Keys other than `slug`, `data` and `parent` fail with
    /// `RegistryError::InvalidArgument` before anything is loaded.
    pub async fn update_definition_from_json(
        &self,
        user: UserId,
        id: DefinitionId,
        patch: serde_json::Value,
    ) -> Result<Definition, RegistryError> {
        let patch = DefinitionPatch::from_json(patch)
            .map_err(|e| RegistryError::InvalidArgument(e.to_string()))?;
        self.update_definition(user, id, patch).await
    }

    /// Apply a partial update.
    ///
    /// The full value set is re-derived from the stored record, patched and
    /// re-validated as a whole. Changing the schema body is refused while any
    /// entity uses the definition; slug or parent changes are always allowed.
    #[instrument(skip_all, fields(definition_id = %id, user_id = %user))]
    pub async fn update_definition(
        &self,
        user: UserId,
        id: DefinitionId,
        patch: DefinitionPatch,
    ) -> Result<Definition, RegistryError> {
        let mut definition = self.load(id).await?;
        ensure_owner(&definition, user)?;

        let current = self.values.restore_definition(definition.export())?;
        let changes = self.resolve_changes(patch).await?;
        let updated = self.values.revise_definition(&current, changes)?;

        if current.data() != updated.data() && self.is_in_use(id).await? {
            tracing::warn!("Refusing schema change on a definition used by entities");
            return Err(RegistryError::DefinitionInUse(id));
        }

        definition.apply(updated)?;
        self.definitions.update(&definition).await?;
        tracing::debug!("Definition updated");
        Ok(definition)
    }

    /// Delete a definition. Roots and definitions used by entities stay.
    #[instrument(skip_all, fields(definition_id = %id, user_id = %user))]
    pub async fn remove_definition(
        &self,
        user: UserId,
        id: DefinitionId,
    ) -> Result<(), RegistryError> {
        let definition = self.load(id).await?;
        if definition.is_root() {
            tracing::warn!("Refusing to remove a root definition");
            return Err(RegistryError::RootDefinition(id));
        }
        ensure_owner(&definition, user)?;

        if self.is_in_use(id).await? {
            tracing::warn!("Refusing to remove a definition used by entities");
            return Err(RegistryError::DefinitionInUse(id));
        }

        self.definitions.delete(&definition).await?;
        tracing::debug!("Definition removed");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn load(&self, id: DefinitionId) -> Result<Definition, RegistryError> {
        self.definitions
            .read(id)
            .await?
            .ok_or_else(|| RegistryError::not_found("Definition", id))
    }

    async fn is_in_use(&self, id: DefinitionId) -> Result<bool, RegistryError> {
        let count = self
            .entities
            .count(&FilterCriteria::for_definition(id))
            .await?;
        Ok(count > 0)
    }

    async fn resolve_changes(
        &self,
        patch: DefinitionPatch,
    ) -> Result<DefinitionChanges, RegistryError> {
        let parent = match patch.parent {
            Some(parent_id) => Some(self.parent_ref(parent_id).await?),
            None => None,
        };
        Ok(DefinitionChanges {
            slug: patch.slug.map(Slug::parse_optional).transpose()?,
            data: patch
                .data
                .map(|raw| self.values.create_json_schema(raw))
                .transpose()?,
            parent,
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

fn ensure_owner(definition: &Definition, user: UserId) -> Result<(), RegistryError> {
    if definition.is_owned_by(user) {
        Ok(())
    } else {
        tracing::warn!("User is not the owner of the definition");
        Err(RegistryError::not_owner("Definition", definition.id(), user))
    }
}
