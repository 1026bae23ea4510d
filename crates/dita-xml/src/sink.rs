/*
 * sink.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * EventSink that writes XML text with quick-xml.
 */

use crate::error::{Result, XmlWriteError};
use dita_markdown::{Attribute, EventSink};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::borrow::Cow;
use std::io::Write;

/// Writes the event stream as XML to `W`.
///
/// The XML declaration is written before the root element. The `class`
/// attribute is always written first. An element with no content is
/// written in its empty form (`<data .../>`). No indentation is added
/// because whitespace in `codeblock` and mixed content is significant.
/// Characters XML 1.0 does not allow are written as U+FFFD.
pub struct XmlSink<W: Write> {
    writer: Writer<W>,
    open: Vec<String>,
    /// Start tag not yet written, held to detect empty elements.
    pending: Option<BytesStart<'static>>,
    root_closed: bool,
    finished: bool,
}

impl<W: Write> XmlSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
            open: Vec::new(),
            pending: None,
            root_closed: false,
            finished: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn check_open(&self) -> Result<()> {
        if self.finished {
            return Err(XmlWriteError::AfterEndDocument);
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }
}

impl<W: Write> EventSink for XmlSink<W> {
    type Error = XmlWriteError;

    fn start_element(&mut self, name: &str, class: &str, attributes: &[Attribute]) -> Result<()> {
        self.check_open()?;
        if self.root_closed {
            return Err(XmlWriteError::MultipleRoots(name.to_string()));
        }
        if self.open.is_empty() {
            self.writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        self.flush_pending()?;

        tracing::trace!(element = name, depth = self.open.len(), "start element");
        let mut start = BytesStart::new(name.to_string());
        start.push_attribute(("class", class));
        for attribute in attributes {
            let value = xml_safe(&attribute.value);
            start.push_attribute((attribute.name.as_str(), value.as_ref()));
        }
        self.pending = Some(start);
        self.open.push(name.to_string());
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        self.check_open()?;
        if self.open.is_empty() {
            return Err(XmlWriteError::StrayCharacters);
        }
        if text.is_empty() {
            return Ok(());
        }
        self.flush_pending()?;
        self.writer
            .write_event(Event::Text(BytesText::new(&xml_safe(text))))?;
        Ok(())
    }

    fn end_element(&mut self) -> Result<()> {
        self.check_open()?;
        let name = self.open.pop().ok_or(XmlWriteError::UnmatchedEnd)?;
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(name)))?,
        }
        if self.open.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        self.check_open()?;
        if let Some(name) = self.open.last() {
            return Err(XmlWriteError::Unclosed(name.clone()));
        }
        self.writer.get_mut().flush()?;
        self.finished = true;
        Ok(())
    }
}

/// Allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    tracing::warn!("Replacing characters not allowed in XML with U+FFFD");
    Cow::Owned(
        text.chars()
            .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
            .collect(),
    )
}
