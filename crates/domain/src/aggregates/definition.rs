//! Definition record - a stored JSON Schema in the ownership tree
//!
//! Fields are private. A `Definition` is obtained either from validated
//! [`DefinitionValues`] (repositories call [`Definition::from_values`]) or as a
//! root through the bootstrap constructor [`Definition::root`]. After that the
//! only mutator is [`Definition::apply`], which again takes validated values.

use crate::error::DomainError;
use crate::ids::{DefinitionId, UserId};
use crate::value_objects::{JsonSchemaDocument, Slug};
use crate::values::{DefinitionInput, DefinitionValues};

use super::EntityRef;

/// A stored JSON Schema.
///
/// # Invariants
///
/// - `data` is a structurally valid schema (enforced by `JsonSchemaDocument`)
/// - if `parent` is set, its owner is `owner`
/// - a definition without a parent is a root and stays one
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    id: DefinitionId,
    slug: Option<Slug>,
    data: JsonSchemaDocument,
    parent: Option<EntityRef>,
    owner: UserId,
}

impl Definition {
    /// Materialize a record from validated creation values.
    pub fn from_values(id: DefinitionId, values: DefinitionValues) -> Self {
        let (slug, data, parent, owner) = values.into_parts();
        Self {
            id,
            slug,
            data,
            parent,
            owner,
        }
    }

    /// Create a root definition. Roots are provisioned at bootstrap, never
    /// through the values factory.
    pub fn root(
        id: DefinitionId,
        slug: Option<Slug>,
        data: JsonSchemaDocument,
        owner: UserId,
    ) -> Self {
        Self {
            id,
            slug,
            data,
            parent: None,
            owner,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> DefinitionId {
        self.id
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

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Write slug, schema and parent from revised values.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidArgument` if the values belong to another owner,
    /// or if they would detach a definition that has a parent.
    pub fn apply(&mut self, values: DefinitionValues) -> Result<(), DomainError> {
        if values.owner() != self.owner {
            return Err(DomainError::invalid_argument(
                "definition values belong to a different owner",
            ));
        }
        if self.parent.is_some() && values.parent().is_none() {
            return Err(DomainError::invalid_argument(
                "a definition parent cannot be removed",
            ));
        }
        let (slug, data, parent, _) = values.into_parts();
        self.slug = slug;
        self.data = data;
        self.parent = parent;
        Ok(())
    }

    /// Export the current field set for reconstruction.
    pub fn export(&self) -> DefinitionInput {
        DefinitionInput {
            slug: self.slug.as_ref().map(|s| s.as_str().to_string()),
            data: Some(self.data.as_str().to_string()),
            parent: self.parent,
            owner: Some(self.owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::EntityId;
    use crate::ports::MockJsonSchemaValidator;
    use crate::value_objects::JsonDocument;

    fn schema(raw: &str) -> JsonSchemaDocument {
        let mut validator = MockJsonSchemaValidator::new();
        validator.expect_validate_schema().returning(|_| Ok(()));
        JsonSchemaDocument::new(JsonDocument::parse(raw).unwrap(), &validator).unwrap()
    }

    fn child(owner: UserId) -> Definition {
        let parent = EntityRef::new(EntityId::new(), owner);
        let values = DefinitionValues::new(None, schema("{}"), Some(parent), owner).unwrap();
        Definition::from_values(DefinitionId::new(), values)
    }

    #[test]
    fn root_has_no_parent() {
        let root = Definition::root(DefinitionId::new(), None, schema("{}"), UserId::new());
        assert!(root.is_root());
    }

    #[test]
    fn export_reflects_current_fields() {
        let owner = UserId::new();
        let definition = child(owner);
        let exported = definition.export();

        assert_eq!(exported.owner, Some(owner));
        assert_eq!(exported.parent, definition.parent().copied());
        assert_eq!(exported.data.as_deref(), Some("{}"));
        assert_eq!(exported.slug, None);
    }

    #[test]
    fn apply_writes_revised_fields() {
        let owner = UserId::new();
        let mut definition = child(owner);
        let new_parent = EntityRef::new(EntityId::new(), owner);
        let values = DefinitionValues::new(
            Some(Slug::new("renamed").unwrap()),
            schema(r#"{"type":"object"}"#),
            Some(new_parent),
            owner,
        )
        .unwrap();

        definition.apply(values).unwrap();

        assert_eq!(definition.slug().unwrap().as_str(), "renamed");
        assert_eq!(definition.parent(), Some(&new_parent));
        assert_eq!(definition.data().as_str(), r#"{"type":"object"}"#);
    }

    #[test]
    fn apply_rejects_foreign_values() {
        let mut definition = child(UserId::new());
        let other = UserId::new();
        let values = DefinitionValues::new(
            None,
            schema("{}"),
            Some(EntityRef::new(EntityId::new(), other)),
            other,
        )
        .unwrap();

        assert!(matches!(
            definition.apply(values),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn apply_cannot_turn_child_into_root() {
        let owner = UserId::new();
        let mut definition = child(owner);
        let values = DefinitionValues::new(None, schema("{}"), None, owner).unwrap();

        assert!(definition.apply(values).is_err());
        assert!(!definition.is_root());
    }
}
