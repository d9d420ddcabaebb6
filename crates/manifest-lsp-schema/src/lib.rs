//! Cargo manifest key schema for cargo-manifest-lsp.
//!
//! The schema maps known table names to their known keys and is built once
//! from a bundled example manifest. Lookups are pure reads; unknown names
//! yield empty results rather than errors.

mod example;
pub mod provider;
pub mod schema;
pub mod tables;

pub use provider::SchemaProvider;
pub use schema::{Schema, SchemaError, TableKind};
