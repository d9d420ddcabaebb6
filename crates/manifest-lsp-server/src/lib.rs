//! LSP server for Cargo manifest key completion.

pub mod server;

pub use server::ManifestLspBackend;
