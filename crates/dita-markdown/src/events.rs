/*
 * events.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Push-based structured-output events and the sink they are delivered to.
 */

use serde::Serialize;
use std::convert::Infallible;
use std::fmt;

/// A non-class attribute on a start-element event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One event of the output stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    StartElement {
        name: String,
        class: String,
        attributes: Vec<Attribute>,
    },
    Characters {
        text: String,
    },
    EndElement,
    EndDocument,
}

impl Event {
    pub fn start(name: &str, class: &str, attributes: &[Attribute]) -> Self {
        Event::StartElement {
            name: name.to_string(),
            class: class.to_string(),
            attributes: attributes.to_vec(),
        }
    }

    pub fn characters(text: &str) -> Self {
        Event::Characters {
            text: text.to_string(),
        }
    }
}

/// Receiver of the serializer's event stream.
///
/// The sink owns the open-element path: `end_element` carries no name,
/// so consumers that need it must track their own stack. Escaping is the
/// sink's job; text is delivered verbatim.
pub trait EventSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn start_element(
        &mut self,
        name: &str,
        class: &str,
        attributes: &[Attribute],
    ) -> Result<(), Self::Error>;

    fn characters(&mut self, text: &str) -> Result<(), Self::Error>;

    fn end_element(&mut self) -> Result<(), Self::Error>;

    fn end_document(&mut self) -> Result<(), Self::Error>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    type Error = S::Error;

    fn start_element(
        &mut self,
        name: &str,
        class: &str,
        attributes: &[Attribute],
    ) -> Result<(), Self::Error> {
        (**self).start_element(name, class, attributes)
    }

    fn characters(&mut self, text: &str) -> Result<(), Self::Error> {
        (**self).characters(text)
    }

    fn end_element(&mut self) -> Result<(), Self::Error> {
        (**self).end_element()
    }

    fn end_document(&mut self) -> Result<(), Self::Error> {
        (**self).end_document()
    }
}

/// Sink that records every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<Event>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl EventSink for RecordingSink {
    type Error = Infallible;

    fn start_element(
        &mut self,
        name: &str,
        class: &str,
        attributes: &[Attribute],
    ) -> Result<(), Infallible> {
        self.events.push(Event::start(name, class, attributes));
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), Infallible> {
        self.events.push(Event::characters(text));
        Ok(())
    }

    fn end_element(&mut self) -> Result<(), Infallible> {
        self.events.push(Event::EndElement);
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), Infallible> {
        self.events.push(Event::EndDocument);
        Ok(())
    }
}

/// A well-formedness violation in a recorded stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    /// End-element with no open element.
    UnmatchedEnd { index: usize },
    /// Characters outside of any element.
    StrayCharacters { index: usize },
    /// Event after the root element closed.
    AfterRoot { index: usize },
    /// Elements still open at end of document or end of stream.
    Unclosed { depth: usize },
    /// Event after end-document.
    AfterEndDocument { index: usize },
}

impl fmt::Display for BalanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceError::UnmatchedEnd { index } => {
                write!(f, "end-element at {} has no open element", index)
            }
            BalanceError::StrayCharacters { index } => {
                write!(f, "characters at {} outside any element", index)
            }
            BalanceError::AfterRoot { index } => {
                write!(f, "event at {} follows the closed root element", index)
            }
            BalanceError::Unclosed { depth } => write!(f, "{} element(s) left open", depth),
            BalanceError::AfterEndDocument { index } => {
                write!(f, "event at {} follows end-document", index)
            }
        }
    }
}

impl std::error::Error for BalanceError {}

/// Check that `events` form a single balanced element tree.
pub fn check_balanced(events: &[Event]) -> Result<(), BalanceError> {
    let mut depth = 0usize;
    let mut root_closed = false;
    let mut ended = false;

    for (index, event) in events.iter().enumerate() {
        if ended {
            return Err(BalanceError::AfterEndDocument { index });
        }
        match event {
            Event::StartElement { .. } => {
                if root_closed {
                    return Err(BalanceError::AfterRoot { index });
                }
                depth += 1;
            }
            Event::Characters { .. } => {
                if depth == 0 {
                    return Err(BalanceError::StrayCharacters { index });
                }
            }
            Event::EndElement => {
                if depth == 0 {
                    return Err(BalanceError::UnmatchedEnd { index });
                }
                depth -= 1;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::EndDocument => {
                if depth != 0 {
                    return Err(BalanceError::Unclosed { depth });
                }
                ended = true;
            }
        }
    }

    if depth != 0 {
        return Err(BalanceError::Unclosed { depth });
    }
    Ok(())
}
