//! Extract diagnostics (syntax errors) from the tree-sitter CST.

use lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};
use tree_sitter::Node;

const SOURCE: &str = "cargo-manifest-lsp";

/// Extract syntax error diagnostics from a tree-sitter tree.
pub fn extract_syntax_errors(tree: &tree_sitter::Tree) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    collect_errors(tree.root_node(), &mut diagnostics);
    diagnostics
}

fn collect_errors(node: Node, diagnostics: &mut Vec<Diagnostic>) {
    if node.is_error() {
        diagnostics.push(make_diagnostic(&node, "Syntax error".to_string()));
    } else if node.is_missing() {
        diagnostics.push(make_diagnostic(&node, format!("Missing {}", node.kind())));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, diagnostics);
    }
}

fn make_diagnostic(node: &Node, message: String) -> Diagnostic {
    let start = node.start_position();
    let end = node.end_position();
    Diagnostic {
        range: Range {
            start: Position::new(start.row as u32, start.column as u32),
            end: Position::new(end.row as u32, end.column as u32),
        },
        severity: Some(DiagnosticSeverity::ERROR),
        source: Some(SOURCE.to_string()),
        message,
        ..Default::default()
    }
}
