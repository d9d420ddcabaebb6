//! Key schema built from a TOML document.
//!
//! Each top-level table contributes its first header segment as a known
//! table name and its direct key-value pairs as known keys. Repeated
//! headers with the same first segment (e.g. `[profile.release]` and
//! `[profile.dev]`) merge their key sets.

use manifest_lsp_parser::cst::{find_key_child, key_segments};
use thiserror::Error;
use tree_sitter::Node;

/// Whether a table was declared as `[name]` or `[[name]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Table,
    ArrayTable,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema source failed to parse")]
    Unparseable,
    #[error("schema source contains syntax errors")]
    Syntax,
}

#[derive(Debug)]
struct TableEntry {
    name: String,
    kind: TableKind,
    keys: Vec<String>,
}

/// Immutable mapping of known table names to their known keys.
#[derive(Debug)]
pub struct Schema {
    tables: Vec<TableEntry>,
}

impl Schema {
    /// Build a schema from a TOML source document.
    ///
    /// Fails only when the document is malformed; for the bundled example
    /// manifest that would be a build-time defect, not a runtime condition.
    pub fn parse(source: &str) -> Result<Schema, SchemaError> {
        let tree =
            manifest_lsp_parser::parser::parse_document(source).ok_or(SchemaError::Unparseable)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(SchemaError::Syntax);
        }

        let mut tables: Vec<TableEntry> = Vec::new();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            let kind = match child.kind() {
                "table" => TableKind::Table,
                "table_array_element" => TableKind::ArrayTable,
                _ => continue,
            };

            let Some(header_key) = find_key_child(&child) else {
                continue;
            };
            let segments = key_segments(&header_key, source);
            let Some(name) = segments.first() else {
                continue;
            };

            let keys = pair_keys(&child, source);
            match tables
                .iter_mut()
                .find(|t| t.name == *name && t.kind == kind)
            {
                Some(entry) => {
                    for key in keys {
                        if !entry.keys.contains(&key) {
                            entry.keys.push(key);
                        }
                    }
                }
                None => tables.push(TableEntry {
                    name: name.clone(),
                    kind,
                    keys,
                }),
            }
        }

        Ok(Schema { tables })
    }

    /// Known top-level table names of the requested kind, in document order.
    pub fn top_level_keys(&self, is_array: bool) -> Vec<&str> {
        let wanted = if is_array {
            TableKind::ArrayTable
        } else {
            TableKind::Table
        };
        self.tables
            .iter()
            .filter(|t| t.kind == wanted)
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Known keys for the named table, or empty for unrecognized names.
    ///
    /// The lookup ignores the table kind so `[[bin]]` keys are found under
    /// `bin` just like `[lib]` keys under `lib`.
    pub fn keys_for_table(&self, table_name: &str) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| t.name == table_name)
            .flat_map(|t| t.keys.iter().map(String::as_str))
            .collect()
    }
}

/// First-segment names of the direct key-value pairs of a table node.
fn pair_keys(table: &Node, source: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut cursor = table.walk();
    for child in table.children(&mut cursor) {
        if child.kind() != "pair" {
            continue;
        }
        if let Some(key) = find_key_child(&child) {
            if let Some(first) = key_segments(&key, source).into_iter().next() {
                if !keys.contains(&first) {
                    keys.push(first);
                }
            }
        }
    }
    keys
}
