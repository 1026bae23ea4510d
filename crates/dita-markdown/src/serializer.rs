/*
 * serializer.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pre-order traversal of the document tree into DITA topic events.
 *
 * The topic header comes first: the title from the first top-level
 * heading, then the prolog from the front matter. Remaining top-level
 * blocks go into the body, where each further top-level heading opens a
 * section. Every other node kind is looked up in a closed rendering-rule
 * table: it either becomes an element (with optional attributes and
 * literal text), passes its text through as characters, or has no
 * mapping and aborts the run.
 */

use crate::ast::{Document, Node, NodeKind};
use crate::config::SerializerConfig;
use crate::dita::{
    ATTRIBUTE_NAME_FORMAT, ATTRIBUTE_NAME_HREF, ATTRIBUTE_NAME_ID, ATTRIBUTE_NAME_OUTPUTCLASS,
    ATTRIBUTE_NAME_SCOPE, ATTRIBUTE_NAME_START, DitaClass, HI_D_B, HI_D_I, HI_D_LINE_THROUGH,
    HI_D_SUB, HI_D_SUP, PR_D_CODEBLOCK, PR_D_CODEPH, TOPIC_ALT, TOPIC_BODY, TOPIC_IMAGE, TOPIC_LI,
    TOPIC_LQ, TOPIC_OL, TOPIC_P, TOPIC_PROLOG, TOPIC_REQUIRED_CLEANUP, TOPIC_SECTION,
    TOPIC_SIMPLETABLE, TOPIC_STENTRY, TOPIC_STHEAD, TOPIC_STROW, TOPIC_TITLE, TOPIC_TOPIC,
    TOPIC_UL, TOPIC_XREF,
};
use crate::error::{NodeContext, Result, SerializeError};
use crate::events::{Attribute, EventSink};
use crate::metadata::{FrontMatter, MetadataExtractor};

/// Converts document trees into DITA topic event streams.
///
/// A serializer holds only immutable configuration and can be shared
/// between threads; each call to [`Serializer::serialize`] is independent.
#[derive(Debug, Clone)]
pub struct Serializer {
    config: SerializerConfig,
    metadata: MetadataExtractor,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(SerializerConfig::default())
    }
}

impl Serializer {
    pub fn new(config: SerializerConfig) -> Self {
        Self {
            config,
            metadata: MetadataExtractor::new(&config),
        }
    }

    /// Serialize `document` into `sink`, ending with `end_document`.
    ///
    /// On error, events already delivered to the sink do not form a
    /// complete document and should be discarded.
    pub fn serialize<S: EventSink + ?Sized>(&self, document: &Document, sink: &mut S) -> Result<()> {
        tracing::debug!(
            document = document.display_name(),
            blocks = document.children.len(),
            "Serializing document"
        );

        let mut walk = Walk {
            metadata: &self.metadata,
            document: document.display_name(),
            sink,
            path: Vec::new(),
        };

        let title = document
            .children
            .iter()
            .position(|node| matches!(node.kind, NodeKind::Heading { .. }));
        let prolog = document
            .children
            .iter()
            .enumerate()
            .find_map(|(index, node)| match &node.kind {
                NodeKind::FrontMatter(fm) => Some((index, fm)),
                _ => None,
            });

        let attributes: Vec<Attribute> = self
            .topic_id(document)
            .map(|id| vec![Attribute::new(ATTRIBUTE_NAME_ID, id)])
            .unwrap_or_default();
        walk.start(TOPIC_TOPIC, &attributes)?;

        match title.map(|index| &document.children[index]) {
            Some(heading) => walk.title(heading)?,
            None => {
                tracing::warn!(
                    document = document.display_name(),
                    "No top-level heading, topic title is empty"
                );
                walk.start(TOPIC_TITLE, &[])?;
                walk.end()?;
            }
        }
        if let Some((_, front_matter)) = prolog {
            walk.prolog(front_matter)?;
        }

        let header = [title, prolog.map(|(index, _)| index)];
        let blocks: Vec<&Node> = document
            .children
            .iter()
            .enumerate()
            .filter(|(index, _)| !header.contains(&Some(*index)))
            .map(|(_, node)| node)
            .collect();
        if !blocks.is_empty() {
            walk.start(TOPIC_BODY, &[])?;
            walk.body(&blocks)?;
            walk.end()?;
        }

        walk.end()?;
        walk.sink.end_document().map_err(SerializeError::sink)?;

        tracing::debug!(document = document.display_name(), "Document serialized");
        Ok(())
    }

    fn topic_id(&self, document: &Document) -> Option<String> {
        if self.config.identifier_from_metadata {
            if let Some(id) = document
                .front_matter()
                .and_then(|fm| fm.first_scalar(ATTRIBUTE_NAME_ID))
            {
                return Some(id.to_string());
            }
        }
        document
            .first_heading_text()
            .map(|title| slugify(&title))
            .filter(|id| !id.is_empty())
    }
}

/// How a node kind is rendered.
enum Rule<'n> {
    Element {
        elem: DitaClass,
        attributes: Vec<Attribute>,
        /// Literal text emitted before any children.
        literal: Option<&'n str>,
    },
    Image {
        href: &'n str,
        title: &'n str,
    },
    Characters(&'n str),
    /// Front matter outside the topic header.
    Skipped,
    Unmapped,
}

fn rule_for(kind: &NodeKind) -> Rule<'_> {
    let element = |elem: DitaClass| Rule::Element {
        elem,
        attributes: Vec::new(),
        literal: None,
    };

    match kind {
        // Headings nested in containers; top-level ones become titles.
        NodeKind::Heading { level } => Rule::Element {
            elem: TOPIC_P,
            attributes: vec![heading_level(*level)],
            literal: None,
        },
        NodeKind::Paragraph => element(TOPIC_P),
        NodeKind::List {
            ordered: false, ..
        } => element(TOPIC_UL),
        NodeKind::List {
            ordered: true,
            start,
        } => Rule::Element {
            elem: TOPIC_OL,
            attributes: start
                .filter(|start| *start != 1)
                .map(|start| vec![Attribute::new(ATTRIBUTE_NAME_START, start.to_string())])
                .unwrap_or_default(),
            literal: None,
        },
        NodeKind::ListItem => element(TOPIC_LI),
        NodeKind::CodeBlock { language, literal } => Rule::Element {
            elem: PR_D_CODEBLOCK,
            attributes: language
                .iter()
                .filter(|lang| !lang.is_empty())
                .map(|lang| Attribute::new(ATTRIBUTE_NAME_OUTPUTCLASS, lang.as_str()))
                .collect(),
            literal: Some(literal),
        },
        NodeKind::BlockQuote => element(TOPIC_LQ),
        NodeKind::Table => element(TOPIC_SIMPLETABLE),
        NodeKind::TableRow { header: true } => element(TOPIC_STHEAD),
        NodeKind::TableRow { header: false } => element(TOPIC_STROW),
        NodeKind::TableCell => element(TOPIC_STENTRY),
        NodeKind::FrontMatter(_) => Rule::Skipped,
        NodeKind::ThematicBreak => Rule::Element {
            elem: TOPIC_P,
            attributes: vec![Attribute::new(ATTRIBUTE_NAME_OUTPUTCLASS, "thematic-break")],
            literal: None,
        },
        NodeKind::RawBlock(raw) | NodeKind::RawInline(raw) => Rule::Element {
            elem: TOPIC_REQUIRED_CLEANUP,
            attributes: Vec::new(),
            literal: Some(raw),
        },
        NodeKind::Text(text) => Rule::Characters(text),
        NodeKind::LineBreak => Rule::Characters("\n"),
        NodeKind::Emphasis => element(HI_D_I),
        NodeKind::Strong => element(HI_D_B),
        NodeKind::Strikethrough => element(HI_D_LINE_THROUGH),
        NodeKind::Superscript => element(HI_D_SUP),
        NodeKind::Subscript => element(HI_D_SUB),
        NodeKind::CodeSpan(code) => Rule::Element {
            elem: PR_D_CODEPH,
            attributes: Vec::new(),
            literal: Some(code),
        },
        NodeKind::Link { url, .. } => Rule::Element {
            elem: TOPIC_XREF,
            attributes: link_attributes(url),
            literal: None,
        },
        NodeKind::Image { url, title } => Rule::Image { href: url, title },
        NodeKind::Unsupported { .. } => Rule::Unmapped,
    }
}

fn heading_level(level: u8) -> Attribute {
    Attribute::new(ATTRIBUTE_NAME_OUTPUTCLASS, format!("h{}", level))
}

/// `href` plus scope/format hints derived from the link target.
fn link_attributes(url: &str) -> Vec<Attribute> {
    let mut attributes = vec![Attribute::new(ATTRIBUTE_NAME_HREF, url)];
    if url::Url::parse(url).is_ok() {
        attributes.push(Attribute::new(ATTRIBUTE_NAME_SCOPE, "external"));
        attributes.push(Attribute::new(ATTRIBUTE_NAME_FORMAT, "html"));
    } else {
        let path = url.split(['#', '?']).next().unwrap_or_default();
        if path.ends_with(".md") || path.ends_with(".markdown") {
            attributes.push(Attribute::new(ATTRIBUTE_NAME_FORMAT, "markdown"));
        }
    }
    attributes
}

/// Topic id from title text: lowercase, runs of other characters become `_`.
/// An id that would start with a digit or `-` gets a leading `_` so it
/// stays a valid XML name.
pub fn slugify(title: &str) -> String {
    let mut id = String::with_capacity(title.len());
    let mut pending_separator = false;
    for c in title.chars().map(|c| c.to_ascii_lowercase()) {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            if pending_separator && !id.is_empty() {
                id.push('_');
            }
            pending_separator = false;
            id.push(c);
        } else {
            pending_separator = true;
        }
    }
    let id = id.trim_matches('_');
    match id.chars().next() {
        Some(first) if !first.is_ascii_alphabetic() => format!("_{}", id),
        _ => id.to_string(),
    }
}

/// State of one serialization run.
struct Walk<'a, S: EventSink + ?Sized> {
    metadata: &'a MetadataExtractor,
    document: &'a str,
    sink: &'a mut S,
    /// Names of the currently open elements, for error context.
    path: Vec<&'static str>,
}

impl<'a, S: EventSink + ?Sized> Walk<'a, S> {
    fn start(&mut self, elem: DitaClass, attributes: &[Attribute]) -> Result<()> {
        tracing::trace!(element = elem.local_name, depth = self.path.len(), "start");
        self.sink
            .start_element(elem.local_name, elem.class, attributes)
            .map_err(SerializeError::sink)?;
        self.path.push(elem.local_name);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.sink.end_element().map_err(SerializeError::sink)?;
        self.path.pop();
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        self.sink.characters(text).map_err(SerializeError::sink)
    }

    fn children(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            self.node(node)?;
        }
        Ok(())
    }

    fn title(&mut self, heading: &Node) -> Result<()> {
        let attributes = match heading.kind {
            NodeKind::Heading { level } => vec![heading_level(level)],
            _ => Vec::new(),
        };
        self.start(TOPIC_TITLE, &attributes)?;
        self.children(&heading.children)?;
        self.end()
    }

    fn prolog(&mut self, front_matter: &FrontMatter) -> Result<()> {
        tracing::debug!(keys = front_matter.len(), "Writing prolog from front matter");
        self.start(TOPIC_PROLOG, &[])?;
        self.metadata
            .write(front_matter, &mut *self.sink)
            .map_err(SerializeError::sink)?;
        self.end()
    }

    /// Body blocks in order. Each heading closes the open section, if
    /// any, and opens a new one titled by the heading.
    fn body(&mut self, blocks: &[&Node]) -> Result<()> {
        let mut in_section = false;
        for node in blocks {
            if let NodeKind::Heading { .. } = node.kind {
                if in_section {
                    self.end()?;
                }
                self.start(TOPIC_SECTION, &[])?;
                self.title(node)?;
                in_section = true;
            } else {
                self.node(node)?;
            }
        }
        if in_section {
            self.end()?;
        }
        Ok(())
    }

    fn node(&mut self, node: &Node) -> Result<()> {
        match rule_for(&node.kind) {
            Rule::Element {
                elem,
                attributes,
                literal,
            } => {
                self.start(elem, &attributes)?;
                if let Some(text) = literal {
                    self.characters(text)?;
                }
                if !matches!(node.kind, NodeKind::ThematicBreak) {
                    self.children(&node.children)?;
                }
                self.end()
            }
            Rule::Image { href, title } => {
                self.start(TOPIC_IMAGE, &[Attribute::new(ATTRIBUTE_NAME_HREF, href)])?;
                if !node.children.is_empty() {
                    self.start(TOPIC_ALT, &[])?;
                    self.children(&node.children)?;
                    self.end()?;
                } else if !title.is_empty() {
                    self.start(TOPIC_ALT, &[])?;
                    self.characters(title)?;
                    self.end()?;
                }
                self.end()
            }
            Rule::Characters(text) => self.characters(text),
            Rule::Skipped => {
                tracing::warn!(
                    document = self.document,
                    path = %self.path.join("/"),
                    "Ignoring front matter outside the topic header"
                );
                Ok(())
            }
            Rule::Unmapped => Err(SerializeError::UnmappedNode(Box::new(NodeContext {
                document: self.document.to_string(),
                node: node.kind.name().to_string(),
                position: node.position,
                path: self.path.join("/"),
            }))),
        }
    }
}
