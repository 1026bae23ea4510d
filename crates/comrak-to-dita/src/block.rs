/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Convert comrak block nodes to document tree blocks.
 */

use crate::front_matter::parse_front_matter;
use crate::inline::convert_inline;
use crate::position;
use crate::text::push_merging_text;
use comrak::arena_tree::Node;
use comrak::nodes::{Ast, ListType, NodeValue};
use dita_markdown::ast;
use dita_markdown::{Document, NodeKind};
use std::cell::RefCell;

/// Convert a comrak document to a [`Document`].
///
/// A root that is not a comrak `Document` is converted as the single
/// top-level node.
pub fn convert_document<'a>(root: &'a Node<'a, RefCell<Ast>>, name: Option<&str>) -> Document {
    let is_document = matches!(root.data.borrow().value, NodeValue::Document);
    let children = if is_document {
        convert_children(root)
    } else {
        convert_node(root)
    };
    Document {
        name: name.map(str::to_string),
        children,
    }
}

/// Convert all children of a comrak node, merging adjacent text runs.
pub(crate) fn convert_children<'a>(node: &'a Node<'a, RefCell<Ast>>) -> Vec<ast::Node> {
    let mut out = Vec::new();
    for child in node.children() {
        for converted in convert_node(child) {
            push_merging_text(&mut out, converted);
        }
    }
    out
}

/// Convert one comrak node.
///
/// Returns a Vec because transparent wrappers expand to their children.
pub(crate) fn convert_node<'a>(node: &'a Node<'a, RefCell<Ast>>) -> Vec<ast::Node> {
    let ast = node.data.borrow();
    let position = position(&ast);

    let kind = match &ast.value {
        NodeValue::Document => return convert_children(node),

        NodeValue::Paragraph => NodeKind::Paragraph,

        NodeValue::Heading(heading) => NodeKind::Heading {
            level: heading.level,
        },

        NodeValue::CodeBlock(code_block) => {
            // Only the first word of the info string is the language.
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .map(str::to_string);
            NodeKind::CodeBlock {
                language,
                literal: code_block.literal.to_string(),
            }
        }

        NodeValue::BlockQuote => NodeKind::BlockQuote,

        NodeValue::List(list) => NodeKind::List {
            ordered: matches!(list.list_type, ListType::Ordered),
            start: match list.list_type {
                ListType::Ordered => Some(list.start),
                ListType::Bullet => None,
            },
        },

        NodeValue::Item(_) => NodeKind::ListItem,

        NodeValue::ThematicBreak => NodeKind::ThematicBreak,

        NodeValue::FrontMatter(raw) => {
            NodeKind::FrontMatter(parse_front_matter(&raw.to_string()))
        }

        NodeValue::HtmlBlock(html) => NodeKind::RawBlock(html.literal.to_string()),

        NodeValue::Table(_) => NodeKind::Table,

        NodeValue::TableRow(header) => NodeKind::TableRow { header: *header },

        NodeValue::TableCell => NodeKind::TableCell,

        _ => return convert_inline(node),
    };

    vec![ast::Node {
        kind,
        children: convert_children(node),
        position,
    }]
}
