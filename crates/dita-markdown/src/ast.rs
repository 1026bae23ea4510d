/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Owned Markdown document tree consumed by the serializer.
 *
 * The tree is produced by an external parser bridge and is never
 * mutated while it is being serialized.
 */

use crate::metadata::FrontMatter;

/// A 1-based source position as reported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

/// The root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Document identity (path or system id) used in error reports.
    pub name: Option<String>,
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            name: None,
            children,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }

    /// The first front-matter block among the top-level children.
    pub fn front_matter(&self) -> Option<&FrontMatter> {
        self.children.iter().find_map(|node| match &node.kind {
            NodeKind::FrontMatter(fm) => Some(fm),
            _ => None,
        })
    }

    /// Plain text of the first heading, if any.
    pub fn first_heading_text(&self) -> Option<String> {
        self.children
            .iter()
            .find(|node| matches!(node.kind, NodeKind::Heading { .. }))
            .map(Node::text_content)
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    pub position: Option<SourcePosition>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            position: None,
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            children,
            position: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.position = Some(SourcePosition { line, column });
        self
    }

    /// Concatenated literal text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::CodeSpan(text) | NodeKind::RawInline(text) => {
                out.push_str(text)
            }
            NodeKind::LineBreak => out.push(' '),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Block and inline node kinds with their kind-specific attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Blocks
    Heading {
        level: u8,
    },
    Paragraph,
    List {
        ordered: bool,
        start: Option<usize>,
    },
    ListItem,
    CodeBlock {
        language: Option<String>,
        literal: String,
    },
    BlockQuote,
    Table,
    TableRow {
        header: bool,
    },
    TableCell,
    FrontMatter(FrontMatter),
    ThematicBreak,
    RawBlock(String),

    // Inlines
    Text(String),
    Emphasis,
    Strong,
    Strikethrough,
    Superscript,
    Subscript,
    CodeSpan(String),
    Link {
        url: String,
        title: String,
    },
    Image {
        url: String,
        title: String,
    },
    LineBreak,
    RawInline(String),

    /// A parser node with no counterpart in this tree.
    Unsupported {
        name: String,
    },
}

impl NodeKind {
    /// Stable name used in logs and error context.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Heading { .. } => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::List { .. } => "list",
            NodeKind::ListItem => "list_item",
            NodeKind::CodeBlock { .. } => "code_block",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::Table => "table",
            NodeKind::TableRow { .. } => "table_row",
            NodeKind::TableCell => "table_cell",
            NodeKind::FrontMatter(_) => "front_matter",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::RawBlock(_) => "raw_block",
            NodeKind::Text(_) => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Strikethrough => "strikethrough",
            NodeKind::Superscript => "superscript",
            NodeKind::Subscript => "subscript",
            NodeKind::CodeSpan(_) => "code_span",
            NodeKind::Link { .. } => "link",
            NodeKind::Image { .. } => "image",
            NodeKind::LineBreak => "line_break",
            NodeKind::RawInline(_) => "raw_inline",
            NodeKind::Unsupported { name } => name,
        }
    }
}
