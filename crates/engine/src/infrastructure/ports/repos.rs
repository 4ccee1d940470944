//! Repository port traits for persistence.
//!
//! Repositories materialize records from validated creation values and write
//! back records mutated through `apply`. They own id generation, query
//! execution and any concurrency control.

use async_trait::async_trait;
use jsonhub_domain::{
    Definition, DefinitionId, DefinitionValues, Entity, EntityId, EntityValues, FilterCriteria,
};

use super::error::RepoError;

// =============================================================================
// Definitions
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DefinitionRepo: Send + Sync {
    // CRUD
    async fn create(&self, values: DefinitionValues) -> Result<Definition, RepoError>;
    async fn read(&self, id: DefinitionId) -> Result<Option<Definition>, RepoError>;
    async fn update(&self, definition: &Definition) -> Result<(), RepoError>;
    async fn delete(&self, definition: &Definition) -> Result<(), RepoError>;

    // Queries
    async fn read_all(&self, criteria: &FilterCriteria) -> Result<Vec<Definition>, RepoError>;
    async fn count(&self, criteria: &FilterCriteria) -> Result<u64, RepoError>;
}

// =============================================================================
// Entities
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityRepo: Send + Sync {
    // CRUD
    async fn create(&self, values: EntityValues) -> Result<Entity, RepoError>;
    async fn read(&self, id: EntityId) -> Result<Option<Entity>, RepoError>;
    async fn update(&self, entity: &Entity) -> Result<(), RepoError>;
    async fn delete(&self, entity: &Entity) -> Result<(), RepoError>;

    // Queries
    async fn read_all(&self, criteria: &FilterCriteria) -> Result<Vec<Entity>, RepoError>;
    async fn count(&self, criteria: &FilterCriteria) -> Result<u64, RepoError>;

    // Hierarchy
    async fn count_children(&self, entity: &Entity) -> Result<u64, RepoError>;
}
