//! Entity creation values.

use crate::aggregates::{Definition, EntityRef};
use crate::error::DomainError;
use crate::ids::UserId;
use crate::ports::JsonValidator;
use crate::value_objects::{JsonDocument, Slug};

/// Validated staging form of an entity.
///
/// # Invariants
///
/// - if `parent` is set, `parent.owner() == owner`
/// - `data` conforms to `definition`'s schema
#[derive(Debug, Clone, PartialEq)]
pub struct EntityValues {
    slug: Option<Slug>,
    data: JsonDocument,
    definition: Definition,
    parent: Option<EntityRef>,
    owner: UserId,
    private: bool,
}

/// Already-validated replacements for an entity's mutable fields.
#[derive(Debug, Clone, Default)]
pub struct EntityChanges {
    /// `Some(None)` clears the slug.
    pub slug: Option<Option<Slug>>,
    pub data: Option<JsonDocument>,
    /// `Some(None)` detaches the entity from its parent.
    pub parent: Option<Option<EntityRef>>,
    pub private: Option<bool>,
}

pub(crate) struct EntityParts {
    pub slug: Option<Slug>,
    pub data: JsonDocument,
    pub definition: Definition,
    pub parent: Option<EntityRef>,
    pub owner: UserId,
    pub private: bool,
}

impl EntityValues {
    /// # Errors
    ///
    /// - `DomainError::ParentOwnerMismatch` if the parent has a different owner
    /// - `DomainError::InvalidData` with the validator's message if `data`
    ///   does not conform to the definition schema
    pub fn new(
        slug: Option<Slug>,
        data: JsonDocument,
        definition: Definition,
        parent: Option<EntityRef>,
        owner: UserId,
        private: bool,
        validator: &dyn JsonValidator,
    ) -> Result<Self, DomainError> {
        if let Some(parent) = &parent {
            if parent.owner() != owner {
                return Err(DomainError::ParentOwnerMismatch);
            }
        }
        validator
            .validate(&data, definition.data().document())
            .map_err(DomainError::invalid_data)?;

        Ok(Self {
            slug,
            data,
            definition,
            parent,
            owner,
            private,
        })
    }

    /// Produce a new instance with `changes` applied and every invariant
    /// re-run, including schema conformance.
    pub fn with_changes(
        &self,
        changes: EntityChanges,
        validator: &dyn JsonValidator,
    ) -> Result<Self, DomainError> {
        Self::new(
            changes.slug.unwrap_or_else(|| self.slug.clone()),
            changes.data.unwrap_or_else(|| self.data.clone()),
            self.definition.clone(),
            changes.parent.unwrap_or(self.parent),
            self.owner,
            changes.private.unwrap_or(self.private),
            validator,
        )
    }

    /// Re-derive the same fields against `definition`, checking the data
    /// against its schema again.
    pub fn with_definition(
        &self,
        definition: Definition,
        validator: &dyn JsonValidator,
    ) -> Result<Self, DomainError> {
        Self::new(
            self.slug.clone(),
            self.data.clone(),
            definition,
            self.parent,
            self.owner,
            self.private,
            validator,
        )
    }

    pub fn slug(&self) -> Option<&Slug> {
        self.slug.as_ref()
    }

    pub fn data(&self) -> &JsonDocument {
        &self.data
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub fn parent(&self) -> Option<&EntityRef> {
        self.parent.as_ref()
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub(crate) fn into_parts(self) -> EntityParts {
        EntityParts {
            slug: self.slug,
            data: self.data,
            definition: self.definition,
            parent: self.parent,
            owner: self.owner,
            private: self.private,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{DefinitionId, EntityId};
    use crate::ports::{MockJsonSchemaValidator, MockJsonValidator};
    use crate::value_objects::JsonSchemaDocument;

    fn definition(owner: UserId) -> Definition {
        let mut validator = MockJsonSchemaValidator::new();
        validator.expect_validate_schema().returning(|_| Ok(()));
        let schema = JsonSchemaDocument::new(
            JsonDocument::parse(r#"{"type":"object"}"#).unwrap(),
            &validator,
        )
        .unwrap();
        Definition::root(DefinitionId::new(), None, schema, owner)
    }

    fn accepting() -> MockJsonValidator {
        let mut validator = MockJsonValidator::new();
        validator.expect_validate().returning(|_, _| Ok(()));
        validator
    }

    #[test]
    fn validates_data_against_definition_schema() {
        let owner = UserId::new();
        let definition = definition(owner);
        let schema = definition.data().document().clone();

        let mut validator = MockJsonValidator::new();
        validator
            .expect_validate()
            .withf(move |_, s| *s == schema)
            .times(1)
            .returning(|_, _| Ok(()));

        let values = EntityValues::new(
            None,
            JsonDocument::parse("{}").unwrap(),
            definition,
            None,
            owner,
            false,
            &validator,
        );
        assert!(values.is_ok());
    }

    #[test]
    fn non_conforming_data_carries_validator_message() {
        let owner = UserId::new();
        let mut validator = MockJsonValidator::new();
        validator
            .expect_validate()
            .returning(|_, _| Err("\"x\" is not of type \"object\"".to_string()));

        let result = EntityValues::new(
            None,
            JsonDocument::parse("\"x\"").unwrap(),
            definition(owner),
            None,
            owner,
            false,
            &validator,
        );

        assert_eq!(
            result,
            Err(DomainError::InvalidData(
                "\"x\" is not of type \"object\"".to_string()
            ))
        );
    }

    #[test]
    fn parent_with_other_owner_is_rejected() {
        let owner = UserId::new();
        let parent = EntityRef::new(EntityId::new(), UserId::new());

        let result = EntityValues::new(
            None,
            JsonDocument::parse("{}").unwrap(),
            definition(owner),
            Some(parent),
            owner,
            false,
            &accepting(),
        );

        assert_eq!(result, Err(DomainError::ParentOwnerMismatch));
    }

    #[test]
    fn with_changes_revalidates_new_data() {
        let owner = UserId::new();
        let values = EntityValues::new(
            None,
            JsonDocument::parse("{}").unwrap(),
            definition(owner),
            None,
            owner,
            false,
            &accepting(),
        )
        .unwrap();

        let mut rejecting = MockJsonValidator::new();
        rejecting
            .expect_validate()
            .returning(|_, _| Err("nope".to_string()));

        let result = values.with_changes(
            EntityChanges {
                data: Some(JsonDocument::parse("[]").unwrap()),
                ..Default::default()
            },
            &rejecting,
        );

        assert!(matches!(result, Err(DomainError::InvalidData(_))));
    }

    #[test]
    fn with_definition_checks_data_against_the_new_schema() {
        let owner = UserId::new();
        let values = EntityValues::new(
            None,
            JsonDocument::parse("42").unwrap(),
            definition(owner),
            None,
            owner,
            false,
            &accepting(),
        )
        .unwrap();
        let replacement = definition(owner);
        let replacement_schema = replacement.data().document().clone();

        let mut validator = MockJsonValidator::new();
        validator
            .expect_validate()
            .withf(move |_, s| *s == replacement_schema)
            .times(1)
            .returning(|_, _| Err("42 is not of type \"object\"".to_string()));

        let result = values.with_definition(replacement, &validator);
        assert!(matches!(result, Err(DomainError::InvalidData(_))));
    }

    #[test]
    fn with_changes_can_detach_parent_and_toggle_private() {
        let owner = UserId::new();
        let values = EntityValues::new(
            None,
            JsonDocument::parse("{}").unwrap(),
            definition(owner),
            Some(EntityRef::new(EntityId::new(), owner)),
            owner,
            false,
            &accepting(),
        )
        .unwrap();

        let updated = values
            .with_changes(
                EntityChanges {
                    parent: Some(None),
                    private: Some(true),
                    ..Default::default()
                },
                &accepting(),
            )
            .unwrap();

        assert!(updated.parent().is_none());
        assert!(updated.is_private());
        assert_eq!(updated.data(), values.data());
    }
}
