//! ManifestParser: tree-sitter + ropey::Rope for incremental TOML parsing.

use ropey::Rope;
use tree_sitter::{InputEdit, Parser, Point, Tree};

/// One-shot parse of a TOML document, without edit tracking.
///
/// Used for fixed inputs such as the bundled schema source; open editor
/// documents go through [`ManifestParser`] instead.
pub fn parse_document(source: &str) -> Option<Tree> {
    let mut parser = toml_parser();
    parser.parse(source.as_bytes(), None)
}

fn toml_parser() -> Parser {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_toml_ng::LANGUAGE.into())
        .expect("Failed to set tree-sitter TOML language");
    parser
}

/// Manages parsing state for a single open manifest document.
pub struct ManifestParser {
    parser: Parser,
    tree: Option<Tree>,
    rope: Rope,
}

impl ManifestParser {
    /// Create a new ManifestParser with the TOML grammar loaded.
    pub fn new() -> Self {
        ManifestParser {
            parser: toml_parser(),
            tree: None,
            rope: Rope::new(),
        }
    }

    /// Full parse of a source string (used on didOpen).
    pub fn parse_full(&mut self, source: &str) {
        self.rope = Rope::from_str(source);
        self.tree = self.parser.parse(source.as_bytes(), None);
    }

    /// Apply an incremental edit from LSP didChange and reparse.
    ///
    /// The range is in 0-based LSP line/character coordinates (characters
    /// are UTF-16 code units), `new_text` is the replacement text.
    pub fn apply_edit(
        &mut self,
        start_line: u32,
        start_char: u32,
        end_line: u32,
        end_char: u32,
        new_text: &str,
    ) {
        let start_byte = self.position_to_byte(start_line as usize, start_char as usize);
        let old_end_byte = self.position_to_byte(end_line as usize, end_char as usize);

        // Tree-sitter points are byte columns; derive them from the byte
        // offsets before the rope is mutated
        let (start_row, start_col) = self.byte_to_position(start_byte);
        let (old_end_row, old_end_col) = self.byte_to_position(old_end_byte);

        // Splice the replacement into the rope
        let start_char_idx = self.rope.byte_to_char(start_byte);
        let end_char_idx = self.rope.byte_to_char(old_end_byte);
        self.rope.remove(start_char_idx..end_char_idx);
        self.rope.insert(start_char_idx, new_text);

        let new_end_byte = start_byte + new_text.len();
        let (new_end_row, new_end_col) = self.byte_to_position(new_end_byte);

        // Tell tree-sitter about the edit so the reparse is incremental
        if let Some(tree) = &mut self.tree {
            tree.edit(&InputEdit {
                start_byte,
                old_end_byte,
                new_end_byte,
                start_position: Point::new(start_row, start_col),
                old_end_position: Point::new(old_end_row, old_end_col),
                new_end_position: Point::new(new_end_row, new_end_col),
            });
        }

        let source = self.rope.to_string();
        self.tree = self.parser.parse(source.as_bytes(), self.tree.as_ref());
    }

    /// Get the current tree-sitter Tree (if parsed successfully).
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Get the current source as a String.
    pub fn source(&self) -> String {
        self.rope.to_string()
    }

    /// Get the current rope.
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Convert an LSP (line, character) position to a byte offset in the
    /// rope. Characters count UTF-16 code units; past-the-end positions
    /// clamp to the line/document boundary.
    fn position_to_byte(&self, line: usize, character: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_bytes();
        }
        let line_start_char = self.rope.line_to_char(line);
        let line_end_char = if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1)
        } else {
            self.rope.len_chars()
        };
        let line_start_cu = self.rope.char_to_utf16_cu(line_start_char);
        let line_end_cu = self.rope.char_to_utf16_cu(line_end_char);
        let target_cu = (line_start_cu + character).min(line_end_cu);
        self.rope.char_to_byte(self.rope.utf16_cu_to_char(target_cu))
    }

    /// Convert byte offset to (line, char).
    fn byte_to_position(&self, byte: usize) -> (usize, usize) {
        let byte = byte.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(byte);
        (line, byte - self.rope.line_to_byte(line))
    }
}

impl Default for ManifestParser {
    fn default() -> Self {
        Self::new()
    }
}
