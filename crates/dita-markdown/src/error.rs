/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for input acquisition and serialization.

use crate::ast::SourcePosition;
use std::fmt;
use thiserror::Error;

/// Errors raised while acquiring the document text.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// The source could not be read.
    #[error("Failed to read {document}: {source}")]
    Read {
        document: String,
        #[source]
        source: std::io::Error,
    },

    /// The declared encoding label is not known.
    #[error("Unsupported encoding '{label}' for {document}")]
    UnsupportedEncoding { document: String, label: String },

    /// The location uses a scheme other than `file:`.
    #[error("Unsupported location '{location}': only file locations can be resolved")]
    UnsupportedLocation { location: String },

    /// A character stream did not contain valid UTF-8.
    #[error("Character stream for {document} is not valid UTF-8")]
    InvalidCharacters { document: String },
}

/// Where an unmapped node was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeContext {
    /// Document name, or `<anonymous>` when the tree carries none.
    pub document: String,
    /// Kind name of the offending node.
    pub node: String,
    pub position: Option<SourcePosition>,
    /// Element path from the topic root, e.g. `topic/ul/li/p`.
    pub path: String,
}

impl fmt::Display for NodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.document)?;
        if let Some(pos) = &self.position {
            write!(f, ":{}:{}", pos.line, pos.column)?;
        }
        write!(f, " ({}) in {}", self.node, self.path)
    }
}

/// Errors raised during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// A node kind has no rendering rule.
    #[error("No DITA mapping for node at {0}")]
    UnmappedNode(Box<NodeContext>),

    /// The event sink rejected an event.
    #[error("Event sink failed: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl SerializeError {
    pub(crate) fn sink<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SerializeError::Sink(Box::new(err))
    }
}

/// Result type for serialization.
pub type Result<T> = std::result::Result<T, SerializeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_context_display_with_position() {
        let ctx = NodeContext {
            document: "guide.md".to_string(),
            node: "footnote_definition".to_string(),
            position: Some(SourcePosition { line: 4, column: 1 }),
            path: "topic/ul/li".to_string(),
        };
        assert_eq!(
            ctx.to_string(),
            "guide.md:4:1 (footnote_definition) in topic/ul/li"
        );
    }

    #[test]
    fn test_node_context_display_without_position() {
        let ctx = NodeContext {
            document: "<anonymous>".to_string(),
            node: "math".to_string(),
            position: None,
            path: "topic/p".to_string(),
        };
        let err = SerializeError::UnmappedNode(Box::new(ctx));
        assert_eq!(
            err.to_string(),
            "No DITA mapping for node at <anonymous> (math) in topic/p"
        );
    }
}
