//! Read-only query descriptor for listing and counting records.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{DefinitionId, EntityId, UserId};

/// Default page size when none is given.
pub const DEFAULT_LIMIT: u32 = 10;

/// Parent constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum ParentFilter {
    /// Only records without a parent.
    Root,
    /// Only direct children of this entity.
    Entity(EntityId),
}

/// Query descriptor passed through to repositories.
///
/// # Invariants
///
/// - `private == Some(true)` requires `owner` to be set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    search: Option<String>,
    slug: Option<String>,
    definition: Option<DefinitionId>,
    parent: Option<ParentFilter>,
    owner: Option<UserId>,
    private: Option<bool>,
    offset: u32,
    limit: u32,
}

impl FilterCriteria {
    pub fn builder() -> FilterCriteriaBuilder {
        FilterCriteriaBuilder::new(DEFAULT_LIMIT)
    }

    /// Builder starting from a configured page size.
    pub fn builder_with_limit(limit: u32) -> FilterCriteriaBuilder {
        FilterCriteriaBuilder::new(limit)
    }

    /// Criteria matching every record that uses `definition`.
    pub fn for_definition(definition: DefinitionId) -> Self {
        Self {
            definition: Some(definition),
            ..Self::default()
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn definition(&self) -> Option<DefinitionId> {
        self.definition
    }

    pub fn parent(&self) -> Option<ParentFilter> {
        self.parent
    }

    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    pub fn private(&self) -> Option<bool> {
        self.private
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Same criteria with the limit clamped to `max`.
    pub fn with_limit_cap(mut self, max: u32) -> Self {
        self.limit = self.limit.min(max);
        self
    }

    /// Same criteria restricted to public records. Always valid.
    pub fn public_only(mut self) -> Self {
        self.private = Some(false);
        self
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: None,
            slug: None,
            definition: None,
            parent: None,
            owner: None,
            private: None,
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Builder for [`FilterCriteria`]; `build()` checks the invariants.
#[derive(Debug, Clone)]
pub struct FilterCriteriaBuilder {
    criteria: FilterCriteria,
}

impl FilterCriteriaBuilder {
    fn new(limit: u32) -> Self {
        Self {
            criteria: FilterCriteria {
                limit,
                ..FilterCriteria::default()
            },
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.criteria.search = Some(search.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.criteria.slug = Some(slug.into());
        self
    }

    pub fn definition(mut self, definition: DefinitionId) -> Self {
        self.criteria.definition = Some(definition);
        self
    }

    pub fn parent(mut self, parent: ParentFilter) -> Self {
        self.criteria.parent = Some(parent);
        self
    }

    pub fn owner(mut self, owner: UserId) -> Self {
        self.criteria.owner = Some(owner);
        self
    }

    pub fn private(mut self, private: bool) -> Self {
        self.criteria.private = Some(private);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.criteria.offset = offset;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.criteria.limit = limit;
        self
    }

    /// # Errors
    ///
    /// `DomainError::InvalidFilter` when private records are requested
    /// without an owner.
    pub fn build(self) -> Result<FilterCriteria, DomainError> {
        if self.criteria.private == Some(true) && self.criteria.owner.is_none() {
            return Err(DomainError::invalid_filter(
                "private records can only be filtered for a specific owner",
            ));
        }
        Ok(self.criteria)
    }
}
