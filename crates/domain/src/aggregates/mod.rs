//! Persisted records.
//!
//! Records are materialized by repositories from validated creation values
//! and are only mutated through their `apply` methods.

mod definition;
mod entity;

pub use definition::Definition;
pub use entity::Entity;

use crate::ids::{EntityId, UserId};

/// Lightweight reference to a parent entity.
///
/// Carries the parent's owner so ownership inheritance can be checked
/// without loading the whole parent record. Only obtainable from a stored
/// [`Entity`] via [`Entity::as_parent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    id: EntityId,
    owner: UserId,
}

impl EntityRef {
    pub(crate) fn new(id: EntityId, owner: UserId) -> Self {
        Self { id, owner }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }
}

impl From<&Entity> for EntityRef {
    fn from(entity: &Entity) -> Self {
        entity.as_parent()
    }
}
