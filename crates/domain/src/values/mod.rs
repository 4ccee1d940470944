//! Creation values, their inputs and partial-update patches.
//!
//! Creation values are ephemeral: they are built by the [`ValuesFactory`],
//! handed to a repository or applied onto a record, and never outlive a single
//! registry call.

mod definition;
mod entity;
mod factory;
mod input;
mod patch;

pub use definition::{DefinitionChanges, DefinitionValues};
pub use entity::{EntityChanges, EntityValues};
pub use factory::ValuesFactory;
pub use input::{DefinitionInput, EntityInput};
pub use patch::{DefinitionPatch, EntityPatch};
