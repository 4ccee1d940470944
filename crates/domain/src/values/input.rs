//! Loosely-typed creation input.
//!
//! Every field is optional here; the values factory decides what is required
//! and reports missing data as a typed error. Records export their current
//! state in the same shape, which is what update flows reconstruct from.

use crate::aggregates::{Definition, EntityRef};
use crate::ids::UserId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionInput {
    pub slug: Option<String>,
    /// Raw JSON Schema text.
    pub data: Option<String>,
    pub parent: Option<EntityRef>,
    pub owner: Option<UserId>,
}

impl DefinitionInput {
    pub fn new(owner: UserId, parent: EntityRef, data: impl Into<String>) -> Self {
        Self {
            slug: None,
            data: Some(data.into()),
            parent: Some(parent),
            owner: Some(owner),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityInput {
    pub slug: Option<String>,
    /// Raw JSON text.
    pub data: Option<String>,
    pub definition: Option<Definition>,
    pub parent: Option<EntityRef>,
    pub owner: Option<UserId>,
    pub private: Option<bool>,
}

impl EntityInput {
    pub fn new(owner: UserId, definition: Definition, data: impl Into<String>) -> Self {
        Self {
            slug: None,
            data: Some(data.into()),
            definition: Some(definition),
            parent: None,
            owner: Some(owner),
            private: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_parent(mut self, parent: EntityRef) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_private(mut self, private: bool) -> Self {
        self.private = Some(private);
        self
    }
}
