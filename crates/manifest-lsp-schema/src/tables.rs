//! Manifest table semantics shared across crates.

/// Tables whose entries are user-defined package names. Key completion does
/// not apply inside them.
pub const DEPENDENCY_TABLE_NAMES: &[&str] =
    &["dependencies", "dev-dependencies", "build-dependencies"];

/// Whether a table header names a dependency list.
///
/// Matches on the last header segment so target-specific tables such as
/// `[target.'cfg(unix)'.dependencies]` are covered too.
pub fn is_dependency_table_header(segments: &[String]) -> bool {
    segments
        .last()
        .map(|s| DEPENDENCY_TABLE_NAMES.contains(&s.as_str()))
        .unwrap_or(false)
}
