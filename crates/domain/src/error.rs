//! Unified error type for value construction.
//!
//! Every value object, creation value and query descriptor in this crate is
//! built through a constructor returning `Result<_, DomainError>`, so an
//! instance that exists has already passed all of its invariants.

use thiserror::Error;

/// Construction failure for domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Slug contains characters or separators outside the allowed pattern
    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    /// Slug is longer than the allowed maximum
    #[error("Slug too long: {length} characters (max {max})")]
    SlugTooLong { length: usize, max: usize },

    /// Text is not parseable JSON
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// Document is JSON but not a structurally valid JSON Schema
    #[error("Invalid JSON Schema: {0}")]
    InvalidSchema(String),

    /// Entity data does not conform to its definition's schema
    #[error("Data does not match definition schema: {0}")]
    InvalidData(String),

    /// Definition owner differs from the owner of its parent
    #[error("Definition owner must match the owner of its parent")]
    ParentMismatch,

    /// Entity owner differs from the owner of its parent
    #[error("Entity owner must match the owner of its parent")]
    ParentOwnerMismatch,

    /// Required creation fields are missing or empty
    #[error("Not enough data: {0}")]
    NotEnoughData(String),

    /// Caller supplied an argument outside the accepted shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Filter combination is not allowed
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

impl DomainError {
    pub fn invalid_slug(value: impl Into<String>) -> Self {
        Self::InvalidSlug(value.into())
    }

    pub fn malformed_json(msg: impl Into<String>) -> Self {
        Self::MalformedJson(msg.into())
    }

    /// Wraps the schema validator's message.
    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        Self::InvalidSchema(msg.into())
    }

    /// Wraps the document validator's message.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    pub fn not_enough_data(msg: impl Into<String>) -> Self {
        Self::NotEnoughData(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_filter(msg: impl Into<String>) -> Self {
        Self::InvalidFilter(msg.into())
    }

    /// Ownership errors raised while checking parent/child consistency.
    pub fn is_ownership_violation(&self) -> bool {
        matches!(self, Self::ParentMismatch | Self::ParentOwnerMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_too_long_message() {
        let err = DomainError::SlugTooLong { length: 74, max: 64 };
        assert_eq!(err.to_string(), "Slug too long: 74 characters (max 64)");
    }

    #[test]
    fn test_invalid_schema_carries_validator_message() {
        let err =
            DomainError::invalid_schema("\"foo\" is not valid under any of the given schemas");
        assert!(matches!(err, DomainError::InvalidSchema(_)));
        assert!(err.to_string().contains("is not valid under any"));
    }

    #[test]
    fn test_ownership_violation_grouping() {
        assert!(DomainError::ParentMismatch.is_ownership_violation());
        assert!(DomainError::ParentOwnerMismatch.is_ownership_violation());
        assert!(!DomainError::invalid_data("x").is_ownership_violation());
    }
}
