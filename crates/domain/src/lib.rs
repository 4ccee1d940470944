//! JsonHub Domain - value objects, records and invariants.
//!
//! Definitions (JSON Schemas) and entities (JSON documents validated against a
//! definition) live in ownership-scoped trees. Every type here is valid by
//! construction: constructors run all checks and return `DomainError` rather
//! than handing out a half-built value.

pub mod aggregates;
pub mod error;
pub mod filter;
pub mod ids;
pub mod ports;
pub mod value_objects;
pub mod values;

pub use aggregates::{Definition, Entity, EntityRef};
pub use error::DomainError;
pub use filter::{FilterCriteria, FilterCriteriaBuilder, ParentFilter};
pub use ids::{DefinitionId, EntityId, UserId};
pub use ports::{JsonSchemaValidator, JsonValidator};
pub use value_objects::{JsonDocument, JsonSchemaDocument, Slug};
pub use values::{
    DefinitionChanges, DefinitionInput, DefinitionPatch, DefinitionValues, EntityChanges,
    EntityInput, EntityPatch, EntityValues, ValuesFactory,
};
