/*
 * inline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Convert comrak inline nodes to document tree inlines.
 */

use crate::block::convert_children;
use crate::position;
use comrak::arena_tree::Node;
use comrak::nodes::{Ast, NodeValue};
use dita_markdown::ast;
use dita_markdown::NodeKind;
use std::cell::RefCell;

/// Convert a comrak inline node.
///
/// Anything that is neither a known block nor a known inline becomes
/// `NodeKind::Unsupported` carrying comrak's node name.
pub(crate) fn convert_inline<'a>(node: &'a Node<'a, RefCell<Ast>>) -> Vec<ast::Node> {
    let ast = node.data.borrow();
    let position = position(&ast);

    let kind = match &ast.value {
        NodeValue::Text(text) => NodeKind::Text(text.to_string()),

        // Soft breaks keep the line structure of the source.
        NodeValue::SoftBreak => NodeKind::Text("\n".to_string()),

        NodeValue::LineBreak => NodeKind::LineBreak,

        NodeValue::Code(code) => NodeKind::CodeSpan(code.literal.to_string()),

        NodeValue::HtmlInline(html) => NodeKind::RawInline(html.to_string()),

        NodeValue::Emph => NodeKind::Emphasis,

        NodeValue::Strong => NodeKind::Strong,

        NodeValue::Strikethrough => NodeKind::Strikethrough,

        NodeValue::Superscript => NodeKind::Superscript,

        NodeValue::Subscript => NodeKind::Subscript,

        NodeValue::Link(link) => NodeKind::Link {
            url: link.url.to_string(),
            title: link.title.to_string(),
        },

        NodeValue::Image(link) => NodeKind::Image {
            url: link.url.to_string(),
            title: link.title.to_string(),
        },

        // The escaped character is carried by the Text child.
        NodeValue::Escaped => return convert_children(node),

        other => {
            tracing::debug!(
                node = other.xml_node_name(),
                "No document tree counterpart for comrak node"
            );
            NodeKind::Unsupported {
                name: other.xml_node_name().to_string(),
            }
        }
    };

    vec![ast::Node {
        kind,
        children: convert_children(node),
        position,
    }]
}

#[cfg(test)]
mod tests {
    use crate::{configure_options, convert_document, parse_markdown};
    use comrak::{Arena, Options, parse_document};
    use dita_markdown::{Node, NodeKind};
    use pretty_assertions::assert_eq;

    fn first_para_inlines(markdown: &str) -> Vec<Node> {
        let doc = parse_markdown(markdown, None);
        match doc.children.into_iter().next() {
            Some(Node {
                kind: NodeKind::Paragraph,
                children,
                ..
            }) => children,
            other => panic!("Expected Paragraph, got {:?}", other),
        }
    }

    fn kinds(nodes: &[Node]) -> Vec<NodeKind> {
        nodes.iter().map(|n| n.kind.clone()).collect()
    }

    #[test]
    fn test_emphasis_and_strong() {
        let inlines = first_para_inlines("*a* and **b**\n");
        assert_eq!(
            kinds(&inlines),
            vec![
                NodeKind::Emphasis,
                NodeKind::Text(" and ".to_string()),
                NodeKind::Strong,
            ]
        );
        assert_eq!(inlines[0].text_content(), "a");
        assert_eq!(inlines[2].text_content(), "b");
    }

    #[test]
    fn test_code_span() {
        let inlines = first_para_inlines("use `cargo`\n");
        assert_eq!(
            kinds(&inlines),
            vec![
                NodeKind::Text("use ".to_string()),
                NodeKind::CodeSpan("cargo".to_string()),
            ]
        );
    }

    #[test]
    fn test_soft_break_merges_into_text() {
        let inlines = first_para_inlines("one\ntwo\n");
        assert_eq!(kinds(&inlines), vec![NodeKind::Text("one\ntwo".to_string())]);
    }

    #[test]
    fn test_hard_break() {
        let inlines = first_para_inlines("one  \ntwo\n");
        assert_eq!(
            kinds(&inlines),
            vec![
                NodeKind::Text("one".to_string()),
                NodeKind::LineBreak,
                NodeKind::Text("two".to_string()),
            ]
        );
    }

    #[test]
    fn test_link_and_image() {
        let inlines = first_para_inlines("[docs](guide.md \"Guide\") ![logo](logo.png)\n");
        assert_eq!(
            inlines[0].kind,
            NodeKind::Link {
                url: "guide.md".to_string(),
                title: "Guide".to_string(),
            }
        );
        assert_eq!(inlines[0].text_content(), "docs");
        assert_eq!(
            inlines[2].kind,
            NodeKind::Image {
                url: "logo.png".to_string(),
                title: String::new(),
            }
        );
        assert_eq!(inlines[2].text_content(), "logo");
    }

    #[test]
    fn test_strikethrough() {
        let inlines = first_para_inlines("~~gone~~\n");
        assert_eq!(inlines[0].kind, NodeKind::Strikethrough);
    }

    #[test]
    fn test_html_inline() {
        let inlines = first_para_inlines("a <kbd>b</kbd>\n");
        assert_eq!(inlines[1].kind, NodeKind::RawInline("<kbd>".to_string()));
    }

    #[test]
    fn test_footnotes_become_unsupported() {
        let arena = Arena::new();
        let mut options = Options::default();
        configure_options(&mut options);
        options.extension.footnotes = true;
        let root = parse_document(&arena, "Text[^1]\n\n[^1]: note\n", &options);
        let doc = convert_document(root, Some("notes.md"));

        let para = &doc.children[0];
        match &para.children[1].kind {
            NodeKind::Unsupported { name } => assert_eq!(name, "footnote_reference"),
            other => panic!("Expected Unsupported, got {:?}", other),
        }
        assert!(matches!(
            &doc.children[1].kind,
            NodeKind::Unsupported { name } if name == "footnote_definition"
        ));
    }
}
