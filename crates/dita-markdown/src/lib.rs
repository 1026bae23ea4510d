/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Serialize a parsed Markdown document tree into a DITA topic.
 *
 * This crate takes an owned document tree produced by an external
 * Markdown parser and pushes a balanced stream of start-element,
 * characters and end-element events to a caller-supplied sink. Front
 * matter is rendered into the topic prolog in a fixed order. Reading
 * the source text (encoding and byte-order-mark handling) lives in
 * [`input`]; parsing and XML rendering live in other crates.
 */

pub mod ast;
pub mod config;
pub mod dita;
pub mod error;
pub mod events;
pub mod input;
pub mod metadata;
pub mod serializer;

pub use ast::{Document, Node, NodeKind, SourcePosition};
pub use config::SerializerConfig;
pub use error::{AcquisitionError, NodeContext, Result, SerializeError};
pub use events::{Attribute, Event, EventSink, RecordingSink, check_balanced};
pub use input::{AcquiredText, InputSource, acquire};
pub use metadata::{FrontMatter, KnownKeys, MetaValue, MetadataExtractor};
pub use serializer::Serializer;

/// Serialize `document` with `config` into a recorded event list.
pub fn to_events(document: &Document, config: SerializerConfig) -> Result<Vec<Event>> {
    let mut sink = RecordingSink::new();
    Serializer::new(config).serialize(document, &mut sink)?;
    Ok(sink.into_events())
}
