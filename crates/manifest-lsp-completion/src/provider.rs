//! Completion item provider.
//!
//! Maps a classified cursor context to plain key-name completion items from
//! the manifest schema. Ranking, icons, and insertion behavior are left to
//! the client.

use lsp_types::{CompletionItem, CompletionItemKind};
use manifest_lsp_schema::tables::is_dependency_table_header;
use manifest_lsp_schema::Schema;

use crate::context::KeyContext;

/// Provide completion items for a context.
pub fn provide_completions(context: &KeyContext, schema: &Schema) -> Vec<CompletionItem> {
    tracing::trace!(?context, "providing key completions");
    match context {
        KeyContext::TableHeader { is_array } => schema
            .top_level_keys(*is_array)
            .into_iter()
            .map(|name| item(name, CompletionItemKind::STRUCT))
            .collect(),

        KeyContext::EntryKey { table } => {
            // Dependency tables hold user-defined package names, not schema keys
            if is_dependency_table_header(table) {
                return vec![];
            }
            let Some(name) = table.first() else {
                return vec![];
            };
            schema
                .keys_for_table(name)
                .into_iter()
                .map(|key| item(key, CompletionItemKind::FIELD))
                .collect()
        }

        KeyContext::None => vec![],
    }
}

fn item(label: &str, kind: CompletionItemKind) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        kind: Some(kind),
        ..Default::default()
    }
}
