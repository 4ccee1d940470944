//! Partial-update requests.
//!
//! One optional field per mutable property. Parsing from JSON rejects any key
//! outside the allowed set, so the registries only ever see well-formed
//! patches. Parent references are ids here; the registries resolve them.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DomainError;
use crate::ids::EntityId;

/// Allowed changes to a definition: `slug`, `data`, `parent`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionPatch {
    /// `Some(None)` clears the slug.
    #[serde(default, deserialize_with = "present")]
    pub slug: Option<Option<String>>,
    /// Replacement schema text.
    #[serde(default)]
    pub data: Option<String>,
    /// A definition can move to another parent but never lose its parent.
    #[serde(default)]
    pub parent: Option<EntityId>,
}

impl DefinitionPatch {
    /// Parse a patch object.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidArgument` for unknown keys or mistyped values.
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        serde_json::from_value(value).map_err(|e| DomainError::invalid_argument(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.slug.is_none() && self.data.is_none() && self.parent.is_none()
    }
}

/// Allowed changes to an entity: `slug`, `data`, `parent`, `private`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityPatch {
    /// `Some(None)` clears the slug.
    #[serde(default, deserialize_with = "present")]
    pub slug: Option<Option<String>>,
    /// Replacement document text.
    #[serde(default)]
    pub data: Option<String>,
    /// `Some(None)` detaches the entity from its parent.
    #[serde(default, deserialize_with = "present")]
    pub parent: Option<Option<EntityId>>,
    #[serde(default)]
    pub private: Option<bool>,
}

impl EntityPatch {
    /// Parse a patch object.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidArgument` for unknown keys or mistyped values.
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        serde_json::from_value(value).map_err(|e| DomainError::invalid_argument(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.slug.is_none()
            && self.data.is_none()
            && self.parent.is_none()
            && self.private.is_none()
    }
}

// Distinguishes an explicit `null` (Some(None)) from an absent key (None).
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
