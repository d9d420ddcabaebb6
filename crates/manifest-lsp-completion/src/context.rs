//! Completion context detection.
//!
//! Classifies the cursor position in a manifest document as a table-header
//! segment, a key-value key, or neither. The classification is one-shot and
//! structural; every unmatched case falls through to `KeyContext::None` so a
//! completion request can never fail while the user is typing.

use manifest_lsp_parser::cst::{find_key_child, first_segment_node, key_segments, SEGMENT_KINDS};
use tree_sitter::{Node, Point, Tree};

/// The context in which key completion was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyContext {
    /// Cursor on the first segment of a `[name]` or `[[name]]` header.
    /// Candidates are the known top-level table names of that kind.
    TableHeader { is_array: bool },

    /// Cursor on the key of a key-value pair inside a top-level table.
    /// Carries the header segments of the enclosing table.
    EntryKey { table: Vec<String> },

    /// No key completion applies here.
    None,
}

/// Determine the key-completion context at a position.
///
/// The character is an LSP UTF-16 column; it is converted to a byte column
/// up front since tree-sitter points and string slicing are byte-based.
pub fn detect_context(tree: &Tree, source: &str, line: u32, character: u32) -> KeyContext {
    let root = tree.root_node();
    let line_text = source.lines().nth(line as usize).unwrap_or("");
    let byte_col = utf16_col_to_byte(line_text, character as usize);

    let node = match node_at(root, line as usize, byte_col, line_text) {
        Some(n) => n,
        None => return KeyContext::None,
    };

    // Well-formed constructs classify purely from the CST
    if let Some(segment) = segment_at(&node) {
        match classify_segment(&segment, root, source) {
            Classified::Context(ctx) => return ctx,
            Classified::InError => {
                // Fall through to the error-recovery paths below
                if let Some(ctx) = header_in_progress(line_text, byte_col) {
                    return ctx;
                }
                if let Some(table) = preceding_table(root, segment.start_byte(), source) {
                    return KeyContext::EntryKey { table };
                }
                return KeyContext::None;
            }
        }
    }

    // No key node under the cursor. The user may still be in the middle of
    // typing a header (`[pa`), which the grammar only sees as an error.
    if has_error_context(&node) {
        if let Some(ctx) = header_in_progress(line_text, byte_col) {
            return ctx;
        }
    }

    KeyContext::None
}

enum Classified {
    Context(KeyContext),
    /// The segment sits inside an ERROR subtree; structure is unreliable.
    InError,
}

fn classify_segment(segment: &Node, root: Node, source: &str) -> Classified {
    // Climb through dotted_key wrappers to the whole key node
    let mut key = *segment;
    while let Some(parent) = key.parent() {
        if parent.kind() != "dotted_key" {
            break;
        }
        key = parent;
    }

    let Some(parent) = key.parent() else {
        return Classified::Context(KeyContext::None);
    };

    match parent.kind() {
        "table" | "table_array_element" => {
            // Only the first header segment names a top-level table; later
            // segments address nested paths the schema does not model.
            let first = first_segment_node(&key);
            if first.map(|f| f.start_byte()) != Some(segment.start_byte()) {
                return Classified::Context(KeyContext::None);
            }
            if parent.parent().map(|p| p.id()) != Some(root.id()) {
                return Classified::Context(KeyContext::None);
            }
            Classified::Context(KeyContext::TableHeader {
                is_array: parent.kind() == "table_array_element",
            })
        }
        "pair" => match enclosing_table(&parent, source) {
            Owner::Table(table) => Classified::Context(KeyContext::EntryKey { table }),
            Owner::None => Classified::Context(KeyContext::None),
            Owner::Error => Classified::InError,
        },
        "ERROR" => Classified::InError,
        _ => Classified::Context(KeyContext::None),
    }
}

enum Owner {
    Table(Vec<String>),
    None,
    Error,
}

/// Find the key-value owner of a pair: the nearest enclosing top-level table.
///
/// A pair nested in an inline table has no schema-driven keys (its owner is
/// the inline table, not a named section), so it yields `Owner::None`.
fn enclosing_table(pair: &Node, source: &str) -> Owner {
    let mut crossed_error = false;
    let mut current = pair.parent();
    while let Some(node) = current {
        match node.kind() {
            "inline_table" => return Owner::None,
            "table" | "table_array_element" => {
                let Some(header_key) = find_key_child(&node) else {
                    return Owner::None;
                };
                let segments = key_segments(&header_key, source);
                if segments.is_empty() {
                    return Owner::None;
                }
                return Owner::Table(segments);
            }
            "ERROR" => crossed_error = true,
            _ => {}
        }
        current = node.parent();
    }
    if crossed_error {
        Owner::Error
    } else {
        Owner::None
    }
}

/// Locate the smallest node at the cursor, preferring the position just
/// before it so a cursor at the end of a typed key still lands on the key.
fn node_at<'tree>(
    root: Node<'tree>,
    line: usize,
    byte_col: usize,
    line_text: &str,
) -> Option<Node<'tree>> {
    let exact = Point::new(line, byte_col);
    if let Some(node) = root.descendant_for_point_range(exact, exact) {
        if SEGMENT_KINDS.contains(&node.kind()) {
            return Some(node);
        }
    }
    // Step back over one whole character, not one byte
    let mut before = byte_col.saturating_sub(1);
    while before > 0 && !line_text.is_char_boundary(before) {
        before -= 1;
    }
    let before = Point::new(line, before);
    root.descendant_for_point_range(before, before)
}

/// Byte offset within a line for an LSP UTF-16 column.
fn utf16_col_to_byte(line_text: &str, utf16_col: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in line_text.char_indices() {
        if units >= utf16_col {
            return idx;
        }
        units += ch.len_utf16();
    }
    line_text.len()
}

/// The key segment node at or containing the given node, if any.
fn segment_at<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    if SEGMENT_KINDS.contains(&node.kind()) {
        Some(*node)
    } else {
        None
    }
}

fn has_error_context(node: &Node) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.is_error() || n.is_missing() {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Text heuristic for headers the grammar could not finish parsing.
///
/// A line whose text before the cursor is `[` or `[[` followed by a partial
/// first segment is a header being typed. A `.` before the cursor means a
/// later segment, and a `]` means the cursor is past the header; neither
/// gets suggestions.
fn header_in_progress(line_text: &str, byte_col: usize) -> Option<KeyContext> {
    let text_before = &line_text[..byte_col.min(line_text.len())];
    let trimmed = text_before.trim_start();

    let rest = trimmed.strip_prefix('[')?;
    let (is_array, rest) = match rest.strip_prefix('[') {
        Some(inner) => (true, inner),
        None => (false, rest),
    };

    if rest.contains('.') || rest.contains(']') {
        return Some(KeyContext::None);
    }
    Some(KeyContext::TableHeader { is_array })
}

/// Last top-level table starting before the given byte offset.
///
/// Used when the key being typed was swallowed by error recovery and is no
/// longer parented under its table.
fn preceding_table(root: Node, before_byte: usize, source: &str) -> Option<Vec<String>> {
    let mut result = None;
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.start_byte() >= before_byte {
            break;
        }
        if matches!(child.kind(), "table" | "table_array_element") {
            let key = find_key_child(&child)?;
            let segments = key_segments(&key, source);
            if !segments.is_empty() {
                result = Some(segments);
            }
        }
    }
    result
}
