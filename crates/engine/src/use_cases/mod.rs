//! Use cases - registry orchestration.
//!
//! Registries combine the values factory with the repository ports to run
//! the definition and entity lifecycles.

pub mod definitions;
pub mod entities;
mod error;

pub use definitions::DefinitionRegistry;
pub use entities::EntityRegistry;
pub use error::RegistryError;
