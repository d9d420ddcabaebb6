//! Helpers for navigating the TOML CST.

use tree_sitter::Node;

/// Node kinds that represent a single key segment.
pub const SEGMENT_KINDS: &[&str] = &["bare_key", "quoted_key"];

/// Whether a node is a key of any shape (bare, quoted, or dotted).
pub fn is_key_node(node: &Node) -> bool {
    matches!(node.kind(), "bare_key" | "quoted_key" | "dotted_key")
}

/// Extract the ordered segment names of a key node.
///
/// Handles bare, quoted, and dotted keys; quoted segments are unquoted.
pub fn key_segments(key: &Node, source: &str) -> Vec<String> {
    let mut segments = Vec::new();
    collect_segments(key, source, &mut segments);
    segments
}

fn collect_segments(node: &Node, source: &str, out: &mut Vec<String>) {
    match node.kind() {
        "bare_key" => out.push(source[node.byte_range()].to_string()),
        "quoted_key" => {
            let text = &source[node.byte_range()];
            out.push(text.trim_matches(|c| c == '"' || c == '\'').to_string());
        }
        _ => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                collect_segments(&child, source, out);
            }
        }
    }
}

/// First key child of a node (the header key of a table, or the key of a pair).
pub fn find_key_child<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let mut children = node.children(&mut cursor);
    children.find(is_key_node)
}

/// Leftmost key segment node under a key node.
pub fn first_segment_node<'tree>(key: &Node<'tree>) -> Option<Node<'tree>> {
    if SEGMENT_KINDS.contains(&key.kind()) {
        return Some(*key);
    }
    let mut cursor = key.walk();
    let children: Vec<Node> = key.children(&mut cursor).collect();
    for child in children {
        if let Some(found) = first_segment_node(&child) {
            return Some(found);
        }
    }
    None
}
