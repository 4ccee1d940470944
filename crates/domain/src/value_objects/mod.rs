//! Value objects - Immutable objects defined by their attributes

mod json;
mod slug;

pub use json::{JsonDocument, JsonSchemaDocument};
pub use slug::{Slug, MAX_SLUG_LENGTH};
