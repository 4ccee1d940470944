//! Definition creation values.

use crate::aggregates::EntityRef;
use crate::error::DomainError;
use crate::ids::UserId;
use crate::value_objects::{JsonSchemaDocument, Slug};

/// Validated staging form of a definition.
///
/// Used both to create a definition and to compute the result of a partial
/// update before it is written back onto the record.
///
/// # Invariants
///
/// - if `parent` is set, `parent.owner() == owner`
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionValues {
    slug: Option<Slug>,
    data: JsonSchemaDocument,
    parent: Option<EntityRef>,
    owner: UserId,
}

/// Already-validated replacements for a definition's mutable fields.
#[derive(Debug, Clone, Default)]
pub struct DefinitionChanges {
    /// `Some(None)` clears the slug.
    pub slug: Option<Option<Slug>>,
    pub data: Option<JsonSchemaDocument>,
    pub parent: Option<EntityRef>,
}

impl DefinitionValues {
    /// # Errors
    ///
    /// `DomainError::ParentMismatch` if the parent has a different owner.
    pub fn new(
        slug: Option<Slug>,
        data: JsonSchemaDocument,
        parent: Option<EntityRef>,
        owner: UserId,
    ) -> Result<Self, DomainError> {
        if let Some(parent) = &parent {
            if parent.owner() != owner {
                return Err(DomainError::ParentMismatch);
            }
        }
        Ok(Self {
            slug,
            data,
            parent,
            owner,
        })
    }

    /// Produce a new instance with `changes` applied and invariants re-run
    /// against the new combination.
    pub fn with_changes(&self, changes: DefinitionChanges) -> Result<Self, DomainError> {
        Self::new(
            changes.slug.unwrap_or_else(|| self.slug.clone()),
            changes.data.unwrap_or_else(|| self.data.clone()),
            changes.parent.or(self.parent),
            self.owner,
        )
    }

    pub fn slug(&self) -> Option<&Slug> {
        self.slug.as_ref()
    }

    pub fn data(&self) -> &JsonSchemaDocument {
        &self.data
    }

    pub fn parent(&self) -> Option<&EntityRef> {
        self.parent.as_ref()
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Option<Slug>, JsonSchemaDocument, Option<EntityRef>, UserId) {
        (self.slug, self.data, self.parent, self.owner)
    }
}
