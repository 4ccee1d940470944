//! Validated slug newtype.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum slug length in bytes (slugs are ASCII-only).
pub const MAX_SLUG_LENGTH: usize = 64;

// Lowercase alphanumerics and separators, starting with an alphanumeric.
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid regex"));

fn is_separator(c: char) -> bool {
    c == '-' || c == '_'
}

/// Separator placement rules on top of the character pattern.
///
/// A separator may touch one separator of the other kind (`-_`, `_-`) but
/// never its own kind (`--`, `__`). A trailing separator is only allowed when
/// the slug has no such mixed pair.
fn separators_well_placed(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut has_pair = false;
    for pair in bytes.windows(2) {
        let (a, b) = (pair[0] as char, pair[1] as char);
        if is_separator(a) && is_separator(b) {
            if a == b {
                return false;
            }
            has_pair = true;
        }
    }
    let trailing = value.chars().last().is_some_and(is_separator);
    !(has_pair && trailing)
}

/// A short, human-readable identifier for definitions and entities.
///
/// Records carry an `Option<Slug>`; an absent slug is always valid.
///
/// # Invariants
///
/// - Starts with a lowercase letter or digit
/// - Only lowercase letters, digits, `-` and `_`
/// - Never `--` or `__`; a mixed pair (`-_`, `_-`) is allowed
/// - May end in a separator unless it contains a mixed pair
/// - At most 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Create a new validated slug.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidSlug` if the pattern does not match
    /// - `DomainError::SlugTooLong` if longer than 64 characters
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if !SLUG_RE.is_match(&value) || !separators_well_placed(&value) {
            return Err(DomainError::invalid_slug(value));
        }
        if value.len() > MAX_SLUG_LENGTH {
            return Err(DomainError::SlugTooLong {
                length: value.len(),
                max: MAX_SLUG_LENGTH,
            });
        }
        Ok(Self(value))
    }

    /// Validate an optional raw slug. `None` stays `None`.
    pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, DomainError> {
        value.map(Self::new).transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> String {
        slug.0
    }
}
