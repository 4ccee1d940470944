//! Error type shared by the registries.

use jsonhub_domain::{DefinitionId, DomainError, EntityId, UserId};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("User {user} is not the owner of {entity_type} {id}")]
    NotOwner {
        entity_type: &'static str,
        id: String,
        user: UserId,
    },

    /// Schema changes and deletion are blocked while entities use the definition.
    #[error("Definition {0} is used by entities")]
    DefinitionInUse(DefinitionId),

    #[error("Root definition {0} cannot be removed")]
    RootDefinition(DefinitionId),

    #[error("Entity {0} has children")]
    HasChildren(EntityId),

    #[error("Private access denied: {0}")]
    PrivateAccessDenied(String),

    #[error("Forbidden filter: {0}")]
    ForbiddenFilter(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl RegistryError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn not_owner(entity_type: &'static str, id: impl ToString, user: UserId) -> Self {
        Self::NotOwner {
            entity_type,
            id: id.to_string(),
            user,
        }
    }

    /// Ownership and visibility failures (the 403 class).
    pub fn is_forbidden(&self) -> bool {
        match self {
            Self::NotOwner { .. } | Self::PrivateAccessDenied(_) | Self::ForbiddenFilter(_) => true,
            Self::Domain(err) => err.is_ownership_violation(),
            _ => false,
        }
    }

    /// Failures caused by records that still have dependents.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DefinitionInUse(_) | Self::RootDefinition(_) | Self::HasChildren(_)
        )
    }
}
