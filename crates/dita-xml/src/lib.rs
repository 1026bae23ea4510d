/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * DITA XML output for dita-markdown event streams.
 */

pub mod error;
pub mod sink;

pub use error::{Result, XmlWriteError};
pub use sink::XmlSink;

use dita_markdown::{Document, SerializeError, Serializer, SerializerConfig};
use std::io::Write;

/// Serialize `document` as XML into `out`.
pub fn write_xml<W: Write>(
    document: &Document,
    config: SerializerConfig,
    out: W,
) -> dita_markdown::Result<W> {
    let mut sink = XmlSink::new(out);
    Serializer::new(config).serialize(document, &mut sink)?;
    Ok(sink.into_inner())
}

/// Serialize `document` as an XML string.
pub fn to_xml_string(document: &Document, config: SerializerConfig) -> dita_markdown::Result<String> {
    let bytes = write_xml(document, config, Vec::new())?;
    String::from_utf8(bytes).map_err(|err| SerializeError::Sink(Box::new(err)))
}
