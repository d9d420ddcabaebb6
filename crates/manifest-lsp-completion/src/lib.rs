//! Completion engine for cargo-manifest-lsp.
//!
//! Classifies the cursor position in a manifest document and provides
//! key-name completion items from the manifest schema.

pub mod context;
pub mod provider;
