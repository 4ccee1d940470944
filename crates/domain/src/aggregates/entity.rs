//! Entity record - a stored JSON document validated against a definition

use crate::error::DomainError;
use crate::ids::{EntityId, UserId};
use crate::value_objects::{JsonDocument, Slug};
use crate::values::{EntityInput, EntityValues};

use super::{Definition, EntityRef};

/// A stored JSON document.
///
/// # Invariants
///
/// - `data` conforms to `definition`'s schema
/// - if `parent` is set, its owner is `owner`
///
/// Both are checked by [`EntityValues`] before a record can be built or
/// mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    slug: Option<Slug>,
    data: JsonDocument,
    definition: Definition,
    parent: Option<EntityRef>,
    owner: UserId,
    private: bool,
}

impl Entity {
    /// Materialize a record from validated creation values.
    pub fn from_values(id: EntityId, values: EntityValues) -> Self {
        let parts = values.into_parts();
        Self {
            id,
            slug: parts.slug,
            data: parts.data,
            definition: parts.definition,
            parent: parts.parent,
            owner: parts.owner,
            private: parts.private,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
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

    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Whether `requester` may read this entity.
    pub fn is_visible_to(&self, requester: Option<UserId>) -> bool {
        !self.private || requester.is_some_and(|user| self.is_owned_by(user))
    }

    /// Reference used when nesting another record under this entity.
    pub fn as_parent(&self) -> EntityRef {
        EntityRef::new(self.id, self.owner)
    }

    /// Write slug, data, parent, visibility and the definition snapshot from
    /// revised values.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidArgument` if the values belong to another owner or
    /// another definition.
    pub fn apply(&mut self, values: EntityValues) -> Result<(), DomainError> {
        if values.owner() != self.owner {
            return Err(DomainError::invalid_argument(
                "entity values belong to a different owner",
            ));
        }
        if values.definition().id() != self.definition.id() {
            return Err(DomainError::invalid_argument(
                "entity values belong to a different definition",
            ));
        }
        let parts = values.into_parts();
        self.slug = parts.slug;
        self.data = parts.data;
        self.definition = parts.definition;
        self.parent = parts.parent;
        self.private = parts.private;
        Ok(())
    }

    /// Export the current field set for reconstruction.
    pub fn export(&self) -> EntityInput {
        EntityInput {
            slug: self.slug.as_ref().map(|s| s.as_str().to_string()),
            data: Some(self.data.as_str().to_string()),
            definition: Some(self.definition.clone()),
            parent: self.parent,
            owner: Some(self.owner),
            private: Some(self.private),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::DefinitionId;
    use crate::ports::{MockJsonSchemaValidator, MockJsonValidator};
    use crate::value_objects::JsonSchemaDocument;

    fn accepting() -> MockJsonValidator {
        let mut validator = MockJsonValidator::new();
        validator.expect_validate().returning(|_, _| Ok(()));
        validator
    }

    fn definition(owner: UserId) -> Definition {
        let mut schema_validator = MockJsonSchemaValidator::new();
        schema_validator.expect_validate_schema().returning(|_| Ok(()));
        let schema =
            JsonSchemaDocument::new(JsonDocument::parse("{}").unwrap(), &schema_validator)
                .unwrap();
        Definition::root(DefinitionId::new(), None, schema, owner)
    }

    fn entity(owner: UserId, private: bool) -> Entity {
        let values = EntityValues::new(
            None,
            JsonDocument::parse("{}").unwrap(),
            definition(owner),
            None,
            owner,
            private,
            &accepting(),
        )
        .unwrap();
        Entity::from_values(EntityId::new(), values)
    }

    #[test]
    fn public_entity_is_visible_to_anyone() {
        let entity = entity(UserId::new(), false);
        assert!(entity.is_visible_to(None));
        assert!(entity.is_visible_to(Some(UserId::new())));
    }

    #[test]
    fn private_entity_is_visible_only_to_owner() {
        let owner = UserId::new();
        let entity = entity(owner, true);
        assert!(entity.is_visible_to(Some(owner)));
        assert!(!entity.is_visible_to(Some(UserId::new())));
        assert!(!entity.is_visible_to(None));
    }

    #[test]
    fn as_parent_carries_id_and_owner() {
        let owner = UserId::new();
        let entity = entity(owner, false);
        let parent = entity.as_parent();
        assert_eq!(parent.id(), entity.id());
        assert_eq!(parent.owner(), owner);
    }

    #[test]
    fn apply_updates_visibility_and_data() {
        let owner = UserId::new();
        let mut entity = entity(owner, false);
        let values = EntityValues::new(
            Some(Slug::new("item").unwrap()),
            JsonDocument::parse(r#"{"x":1}"#).unwrap(),
            entity.definition().clone(),
            None,
            owner,
            true,
            &accepting(),
        )
        .unwrap();

        entity.apply(values).unwrap();

        assert!(entity.is_private());
        assert_eq!(entity.data().as_str(), r#"{"x":1}"#);
        assert_eq!(entity.slug().unwrap().as_str(), "item");
    }

    #[test]
    fn apply_rejects_values_for_another_definition() {
        let owner = UserId::new();
        let mut entity = entity(owner, false);
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

        assert!(matches!(
            entity.apply(values),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn apply_refreshes_definition_snapshot() {
        let owner = UserId::new();
        let mut entity = entity(owner, false);
        let mut schema_validator = MockJsonSchemaValidator::new();
        schema_validator.expect_validate_schema().returning(|_| Ok(()));
        let stricter = JsonSchemaDocument::new(
            JsonDocument::parse(r#"{"type":"object"}"#).unwrap(),
            &schema_validator,
        )
        .unwrap();
        let definition = Definition::root(entity.definition().id(), None, stricter.clone(), owner);

        let values = EntityValues::new(
            None,
            JsonDocument::parse("{}").unwrap(),
            definition,
            None,
            owner,
            false,
            &accepting(),
        )
        .unwrap();
        entity.apply(values).unwrap();

        assert_eq!(entity.definition().data(), &stricter);
    }

    #[test]
    fn export_round_trips_fields() {
        let owner = UserId::new();
        let entity = entity(owner, true);
        let exported = entity.export();

        assert_eq!(exported.owner, Some(owner));
        assert_eq!(exported.private, Some(true));
        assert_eq!(exported.data.as_deref(), Some("{}"));
        assert_eq!(exported.definition.as_ref(), Some(entity.definition()));
    }
}
