//! Values factory - turns loose input into validated creation values.

use std::sync::Arc;

use crate::aggregates::Definition;
use crate::error::DomainError;
use crate::ports::{JsonSchemaValidator, JsonValidator};
use crate::value_objects::{JsonDocument, JsonSchemaDocument, Slug};

use super::{
    DefinitionChanges, DefinitionInput, DefinitionValues, EntityChanges, EntityInput,
    EntityValues,
};

/// Builds creation values, failing fast on the first violated invariant.
///
/// Pure apart from the injected validator calls.
#[derive(Clone)]
pub struct ValuesFactory {
    json_validator: Arc<dyn JsonValidator>,
    schema_validator: Arc<dyn JsonSchemaValidator>,
}

impl ValuesFactory {
    pub fn new(
        json_validator: Arc<dyn JsonValidator>,
        schema_validator: Arc<dyn JsonSchemaValidator>,
    ) -> Self {
        Self {
            json_validator,
            schema_validator,
        }
    }

    /// Build values for a new definition.
    ///
    /// # Errors
    ///
    /// - `NotEnoughData` unless `data`, `owner` and `parent` are all present
    ///   and `data` is non-blank
    /// - `InvalidSlug` / `SlugTooLong`, `MalformedJson`, `InvalidSchema`
    /// - `ParentMismatch` if the parent belongs to someone else
    pub fn create_definition(
        &self,
        input: DefinitionInput,
    ) -> Result<DefinitionValues, DomainError> {
        if input.parent.is_none() {
            return Err(DomainError::not_enough_data(
                "definition requires data, owner and parent",
            ));
        }
        self.restore_definition(input)
    }

    /// Rebuild values from an exported definition.
    ///
    /// Same checks as [`Self::create_definition`] except that a missing
    /// parent is allowed, so root definitions can be re-derived too.
    pub fn restore_definition(
        &self,
        input: DefinitionInput,
    ) -> Result<DefinitionValues, DomainError> {
        let (Some(data), Some(owner)) = (non_blank(input.data), input.owner) else {
            return Err(DomainError::not_enough_data(
                "definition requires data, owner and parent",
            ));
        };

        DefinitionValues::new(
            Slug::parse_optional(input.slug)?,
            self.create_json_schema(data)?,
            input.parent,
            owner,
        )
    }

    /// Build values for a new entity.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` unless `definition` and `owner` are present
    /// - `InvalidSlug` / `SlugTooLong`, `MalformedJson` (missing data included)
    /// - `ParentOwnerMismatch`, `InvalidData`
    pub fn create_entity(&self, input: EntityInput) -> Result<EntityValues, DomainError> {
        let (Some(definition), Some(owner)) = (input.definition, input.owner) else {
            return Err(DomainError::invalid_argument(
                "fields definition and owner are required",
            ));
        };

        EntityValues::new(
            Slug::parse_optional(input.slug)?,
            JsonDocument::parse(input.data.unwrap_or_default())?,
            definition,
            input.parent,
            owner,
            input.private.unwrap_or(false),
            self.json_validator.as_ref(),
        )
    }

    /// Re-check entity values against the current stored `definition`.
    ///
    /// Values carry a definition snapshot taken when they were built; the
    /// stored definition may have changed since.
    pub fn rebase_entity(
        &self,
        values: &EntityValues,
        definition: Definition,
    ) -> Result<EntityValues, DomainError> {
        values.with_definition(definition, self.json_validator.as_ref())
    }

    /// Validate a replacement schema in isolation.
    pub fn create_json_schema(
        &self,
        raw: impl Into<String>,
    ) -> Result<JsonSchemaDocument, DomainError> {
        JsonSchemaDocument::new(JsonDocument::parse(raw)?, self.schema_validator.as_ref())
    }

    /// Apply changes to definition values, re-running its invariants.
    pub fn revise_definition(
        &self,
        values: &DefinitionValues,
        changes: DefinitionChanges,
    ) -> Result<DefinitionValues, DomainError> {
        values.with_changes(changes)
    }

    /// Apply changes to entity values, re-running its invariants.
    pub fn revise_entity(
        &self,
        values: &EntityValues,
        changes: EntityChanges,
    ) -> Result<EntityValues, DomainError> {
        values.with_changes(changes, self.json_validator.as_ref())
    }
}

impl std::fmt::Debug for ValuesFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuesFactory").finish_non_exhaustive()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
