/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

use thiserror::Error;

/// Errors raised while writing XML.
#[derive(Debug, Error)]
pub enum XmlWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// `end_element` with no open element.
    #[error("End of element with no element open")]
    UnmatchedEnd,

    /// Character data outside the root element.
    #[error("Character data outside the root element")]
    StrayCharacters,

    /// A second root element.
    #[error("Element <{0}> after the root element was closed")]
    MultipleRoots(String),

    /// `end_document` while elements are still open.
    #[error("Document ended with <{0}> still open")]
    Unclosed(String),

    /// Any event after `end_document`.
    #[error("Event after end of document")]
    AfterEndDocument,
}

pub type Result<T> = std::result::Result<T, XmlWriteError>;
