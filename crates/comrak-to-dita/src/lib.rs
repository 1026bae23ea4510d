/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Convert comrak's CommonMark AST to the dita-markdown document tree.
 *
 * comrak nodes without a counterpart in the tree (footnotes, math,
 * description lists, ...) are kept as `NodeKind::Unsupported` so that
 * serialization reports them instead of silently dropping content.
 */

mod block;
pub mod front_matter;
mod inline;
mod text;

pub use block::convert_document;
pub use front_matter::parse_front_matter;

use comrak::nodes::Ast;
use comrak::{Arena, Options, parse_document};
use dita_markdown::{Document, SourcePosition};

/// Delimiter line for YAML front matter.
pub const FRONT_MATTER_DELIMITER: &str = "---";

/// Enable the extensions the DITA mapping understands.
///
/// CommonMark plus tables, strikethrough, superscript, subscript and
/// `---` front matter. Other extensions stay off.
pub fn configure_options(options: &mut Options) {
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.superscript = true;
    options.extension.subscript = true;
    options.extension.front_matter_delimiter = Some(FRONT_MATTER_DELIMITER.to_string());
}

/// Parse Markdown text and convert it to a [`Document`].
pub fn parse_markdown(input: &str, name: Option<&str>) -> Document {
    let arena = Arena::new();
    let mut options = Options::default();
    configure_options(&mut options);
    let root = parse_document(&arena, input, &options);
    convert_document(root, name)
}

/// Source position of a comrak node, if the parser recorded one.
pub(crate) fn position(ast: &Ast) -> Option<SourcePosition> {
    let start = &ast.sourcepos.start;
    (start.line > 0).then_some(SourcePosition {
        line: start.line,
        column: start.column,
    })
}
