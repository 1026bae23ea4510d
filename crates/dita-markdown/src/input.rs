/*
 * input.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Acquire document text from a byte stream, a character stream, or a
 * location, producing a single in-memory buffer for the parser.
 */

use crate::error::AcquisitionError;
use encoding_rs::Encoding;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

enum SourceKind<'a> {
    Bytes(Box<dyn Read + 'a>),
    Characters(Box<dyn Read + 'a>),
    Location(String),
}

/// Where document text comes from.
pub struct InputSource<'a> {
    kind: SourceKind<'a>,
    encoding: Option<String>,
    name: Option<String>,
}

impl<'a> InputSource<'a> {
    /// Raw bytes, decoded with the declared encoding (UTF-8 by default).
    pub fn from_reader(reader: impl Read + 'a) -> Self {
        Self::new(SourceKind::Bytes(Box::new(reader)))
    }

    /// Already-decoded UTF-8 text. Any declared encoding is ignored.
    pub fn from_characters(reader: impl Read + 'a) -> Self {
        Self::new(SourceKind::Characters(Box::new(reader)))
    }

    /// A `file:` URL or a filesystem path.
    pub fn from_location(location: impl Into<String>) -> Self {
        Self::new(SourceKind::Location(location.into()))
    }

    fn new(kind: SourceKind<'a>) -> Self {
        Self {
            kind,
            encoding: None,
            name: None,
        }
    }

    /// Declare the encoding by WHATWG label, e.g. `utf-8` or `windows-1252`.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Name the document for diagnostics.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn document_name(&self) -> String {
        match (&self.name, &self.kind) {
            (Some(name), _) => name.clone(),
            (None, SourceKind::Location(location)) => location.clone(),
            (None, _) => "<stream>".to_string(),
        }
    }
}

/// Document text ready for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredText {
    pub document: String,
    pub text: String,
}

/// Read the whole source into memory and decode it.
///
/// For UTF-8 byte input a leading byte-order mark is dropped. The whole
/// document is buffered before decoding, so the BOM check never leaves a
/// stream partially consumed.
pub fn acquire(source: InputSource<'_>) -> Result<AcquiredText, AcquisitionError> {
    let document = source.document_name();
    let read_error = |source: std::io::Error| AcquisitionError::Read {
        document: document.clone(),
        source,
    };

    let text = match source.kind {
        SourceKind::Characters(mut reader) => {
            let mut text = String::new();
            reader.read_to_string(&mut text).map_err(|err| {
                if err.kind() == ErrorKind::InvalidData {
                    AcquisitionError::InvalidCharacters {
                        document: document.clone(),
                    }
                } else {
                    read_error(err)
                }
            })?;
            text
        }
        SourceKind::Bytes(mut reader) => {
            let encoding = resolve_encoding(source.encoding.as_deref(), &document)?;
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).map_err(read_error)?;
            decode(&bytes, encoding, &document)
        }
        SourceKind::Location(location) => {
            let encoding = resolve_encoding(source.encoding.as_deref(), &document)?;
            let path = resolve_location(&location)?;
            let bytes = std::fs::read(&path).map_err(read_error)?;
            decode(&bytes, encoding, &document)
        }
    };

    tracing::debug!(document = %document, bytes = text.len(), "Acquired input");
    Ok(AcquiredText { document, text })
}

fn resolve_encoding(
    label: Option<&str>,
    document: &str,
) -> Result<&'static Encoding, AcquisitionError> {
    let Some(label) = label else {
        return Ok(encoding_rs::UTF_8);
    };
    match Encoding::for_label(label.trim().as_bytes()) {
        Some(encoding) if encoding != encoding_rs::REPLACEMENT => Ok(encoding),
        _ => Err(AcquisitionError::UnsupportedEncoding {
            document: document.to_string(),
            label: label.to_string(),
        }),
    }
}

fn resolve_location(location: &str) -> Result<PathBuf, AcquisitionError> {
    let unsupported = || AcquisitionError::UnsupportedLocation {
        location: location.to_string(),
    };
    match url::Url::parse(location) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().map_err(|()| unsupported()),
        // A single-letter scheme is a Windows drive, not a URL.
        Ok(url) if url.scheme().len() == 1 => Ok(PathBuf::from(location)),
        Ok(_) => Err(unsupported()),
        Err(_) => Ok(PathBuf::from(location)),
    }
}

fn decode(bytes: &[u8], encoding: &'static Encoding, document: &str) -> String {
    let bytes = if encoding == encoding_rs::UTF_8 {
        bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes)
    } else {
        bytes
    };
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::warn!(
            document,
            encoding = encoding.name(),
            "Malformed byte sequences replaced while decoding"
        );
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_to_string(source: InputSource<'_>) -> Result<String, AcquisitionError> {
        acquire(source).map(|acquired| acquired.text)
    }

    #[test]
    fn test_bom_stripped_for_utf8() {
        let bytes = b"\xEF\xBB\xBF# Title\n".to_vec();
        let text = read_to_string(InputSource::from_reader(Cursor::new(bytes))).unwrap();
        assert_eq!(text, "# Title\n");
    }

    #[test]
    fn test_short_input_not_mistaken_for_bom() {
        let text = read_to_string(InputSource::from_reader(Cursor::new(b"\xEF".to_vec()))).unwrap();
        assert_eq!(text, "\u{FFFD}");

        let text = read_to_string(InputSource::from_reader(Cursor::new(b"ab".to_vec()))).unwrap();
        assert_eq!(text, "ab");
    }

    #[test]
    fn test_bom_kept_for_other_encodings() {
        let bytes = b"\xEF\xBB\xBFx".to_vec();
        let text = read_to_string(
            InputSource::from_reader(Cursor::new(bytes)).with_encoding("windows-1252"),
        )
        .unwrap();
        assert_eq!(text, "\u{EF}\u{BB}\u{BF}x");
    }

    #[test]
    fn test_declared_latin1() {
        let text = read_to_string(
            InputSource::from_reader(Cursor::new(b"caf\xE9".to_vec())).with_encoding("iso-8859-1"),
        )
        .unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn test_unknown_encoding() {
        let err = acquire(
            InputSource::from_reader(Cursor::new(Vec::new()))
                .with_encoding("klingon")
                .with_name("a.md"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AcquisitionError::UnsupportedEncoding { ref document, ref label }
                if document == "a.md" && label == "klingon"
        ));
    }

    #[test]
    fn test_character_stream_taken_verbatim() {
        let acquired =
            acquire(InputSource::from_characters(Cursor::new("\u{FEFF}text".as_bytes()))).unwrap();
        assert_eq!(acquired.text, "\u{FEFF}text");
        assert_eq!(acquired.document, "<stream>");
    }

    #[test]
    fn test_character_stream_invalid_utf8() {
        let err = acquire(InputSource::from_characters(Cursor::new(vec![0xFF, 0xFE]))).unwrap_err();
        assert!(matches!(err, AcquisitionError::InvalidCharacters { .. }));
    }

    #[test]
    fn test_read_error_is_reported() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }
        let err = acquire(InputSource::from_reader(Broken).with_name("x.md")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to read x.md: disk on fire");
    }

    #[test]
    fn test_http_location_unsupported() {
        let err = acquire(InputSource::from_location("https://example.com/a.md")).unwrap_err();
        assert!(matches!(err, AcquisitionError::UnsupportedLocation { .. }));
    }

    #[test]
    fn test_resolve_plain_path() {
        assert_eq!(
            resolve_location("docs/intro.md").unwrap(),
            PathBuf::from("docs/intro.md")
        );
    }
}
