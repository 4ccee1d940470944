//! JsonHub engine library.
//!
//! ## Structure
//!
//! - `use_cases/` - Definition and entity registries
//! - `infrastructure/` - Ports, configuration and adapters
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures shared by unit and end-to-end tests.
#[cfg(test)]
pub mod test_fixtures;

/// End-to-end tests against the in-memory store and real validators.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
