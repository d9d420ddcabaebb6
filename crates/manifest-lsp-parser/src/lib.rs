//! TOML parser for cargo-manifest-lsp.
//!
//! Wraps the tree-sitter TOML grammar for incremental parsing of open
//! manifest documents and provides syntax diagnostics from the CST.

pub mod cst;
pub mod diagnostics;
pub mod parser;
