/*
 * metadata.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Front-matter data and its rendering into DITA prolog metadata.
 *
 * Emission order is fixed: author, source, publisher, permissions, the
 * optional metadata group (audience, category, keywords), resourceid, and
 * finally every remaining key as generic `data` in ordinal key order.
 */

use crate::config::SerializerConfig;
use crate::dita::{
    ATTRIBUTE_NAME_APPID, ATTRIBUTE_NAME_AUDIENCE, ATTRIBUTE_NAME_ID, ATTRIBUTE_NAME_NAME,
    ATTRIBUTE_NAME_VALUE, ATTRIBUTE_NAME_VIEW, DitaClass, TOPIC_AUDIENCE, TOPIC_AUTHOR,
    TOPIC_CATEGORY, TOPIC_DATA, TOPIC_KEYWORD, TOPIC_KEYWORDS, TOPIC_METADATA,
    TOPIC_PERMISSIONS, TOPIC_PUBLISHER, TOPIC_RESOURCEID, TOPIC_SOURCE,
};
use crate::events::{Attribute, EventSink};
use std::collections::{BTreeMap, BTreeSet};

/// A single front-matter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Scalar(String),
    /// `~`, `null` or an empty value.
    Null,
    /// A non-scalar value flattened to flow-style text.
    Structured(String),
}

impl MetaValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        MetaValue::Scalar(value.into())
    }

    /// Text used in output. Null renders as the empty string.
    pub fn as_text(&self) -> &str {
        match self {
            MetaValue::Scalar(text) | MetaValue::Structured(text) => text,
            MetaValue::Null => "",
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, MetaValue::Structured(_))
    }
}

/// Front-matter mapping from key to its values in source order.
///
/// Keys iterate in ordinal (byte-wise) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: BTreeMap<String, Vec<MetaValue>>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the values for `key`.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<MetaValue>) {
        self.entries.insert(key.into(), values);
    }

    /// Append one value to `key`, creating the key if needed.
    pub fn push(&mut self, key: impl Into<String>, value: MetaValue) {
        self.entries.entry(key.into()).or_default().push(value);
    }

    pub fn get(&self, key: &str) -> Option<&[MetaValue]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MetaValue])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// First value of `key` when it is a non-empty scalar.
    pub fn first_scalar(&self, key: &str) -> Option<&str> {
        match self.get(key)?.first()? {
            MetaValue::Scalar(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<MetaValue>)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (K, Vec<MetaValue>)>>(iter: I) -> Self {
        let mut fm = FrontMatter::new();
        for (key, values) in iter {
            fm.insert(key, values);
        }
        fm
    }
}

/// Metadata keys with a dedicated structural mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownKeys {
    keys: BTreeSet<&'static str>,
}

impl KnownKeys {
    pub fn new(config: &SerializerConfig) -> Self {
        let mut keys: BTreeSet<&'static str> = [
            TOPIC_AUTHOR.local_name,
            TOPIC_SOURCE.local_name,
            TOPIC_PUBLISHER.local_name,
            TOPIC_PERMISSIONS.local_name,
            TOPIC_AUDIENCE.local_name,
            TOPIC_CATEGORY.local_name,
            TOPIC_RESOURCEID.local_name,
            TOPIC_KEYWORD.local_name,
        ]
        .into_iter()
        .collect();
        if config.identifier_from_metadata {
            keys.insert(ATTRIBUTE_NAME_ID);
        }
        Self { keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.keys.iter().copied()
    }
}

/// Renders [`FrontMatter`] into prolog metadata events.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    known_keys: KnownKeys,
}

impl MetadataExtractor {
    pub fn new(config: &SerializerConfig) -> Self {
        Self {
            known_keys: KnownKeys::new(config),
        }
    }

    /// Emit the metadata events for `header` into `sink`.
    pub fn write<S: EventSink + ?Sized>(
        &self,
        header: &FrontMatter,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        for (key, _) in header.iter().filter(|(key, _)| self.is_demoted(header, key)) {
            tracing::warn!(key, "Non-scalar front matter value, emitting as generic data");
        }

        self.write_text(header, TOPIC_AUTHOR, sink)?;
        self.write_text(header, TOPIC_SOURCE, sink)?;
        self.write_text(header, TOPIC_PUBLISHER, sink)?;
        self.write_attribute(header, TOPIC_PERMISSIONS, ATTRIBUTE_NAME_VIEW, sink)?;

        let has_keywords = self.structural(header, TOPIC_KEYWORD).is_some();
        if self.structural(header, TOPIC_AUDIENCE).is_some()
            || self.structural(header, TOPIC_CATEGORY).is_some()
            || has_keywords
        {
            start(sink, TOPIC_METADATA, &[])?;
            self.write_attribute(header, TOPIC_AUDIENCE, ATTRIBUTE_NAME_AUDIENCE, sink)?;
            self.write_text(header, TOPIC_CATEGORY, sink)?;
            if has_keywords {
                start(sink, TOPIC_KEYWORDS, &[])?;
                self.write_text(header, TOPIC_KEYWORD, sink)?;
                sink.end_element()?;
            }
            sink.end_element()?;
        }

        self.write_attribute(header, TOPIC_RESOURCEID, ATTRIBUTE_NAME_APPID, sink)?;

        for (key, values) in header.iter() {
            if self.known_keys.contains(key) && !self.is_demoted(header, key) {
                continue;
            }
            for value in values {
                start(
                    sink,
                    TOPIC_DATA,
                    &[
                        Attribute::new(ATTRIBUTE_NAME_NAME, key),
                        Attribute::new(ATTRIBUTE_NAME_VALUE, value.as_text()),
                    ],
                )?;
                sink.end_element()?;
            }
        }
        Ok(())
    }

    /// Values of a known key that can be rendered structurally.
    fn structural<'h>(&self, header: &'h FrontMatter, elem: DitaClass) -> Option<&'h [MetaValue]> {
        let values = header.get(elem.local_name)?;
        if values.iter().any(MetaValue::is_structured) {
            None
        } else {
            Some(values)
        }
    }

    fn is_demoted(&self, header: &FrontMatter, key: &str) -> bool {
        self.known_keys.contains(key)
            && header
                .get(key)
                .is_some_and(|values| values.iter().any(MetaValue::is_structured))
    }

    fn write_text<S: EventSink + ?Sized>(
        &self,
        header: &FrontMatter,
        elem: DitaClass,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        let Some(values) = self.structural(header, elem) else {
            return Ok(());
        };
        for value in values {
            start(sink, elem, &[])?;
            let text = value.as_text();
            if !text.is_empty() {
                sink.characters(text)?;
            }
            sink.end_element()?;
        }
        Ok(())
    }

    fn write_attribute<S: EventSink + ?Sized>(
        &self,
        header: &FrontMatter,
        elem: DitaClass,
        attr: &str,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        let Some(values) = self.structural(header, elem) else {
            return Ok(());
        };
        for value in values {
            start(sink, elem, &[Attribute::new(attr, value.as_text())])?;
            sink.end_element()?;
        }
        Ok(())
    }
}

fn start<S: EventSink + ?Sized>(
    sink: &mut S,
    elem: DitaClass,
    attributes: &[Attribute],
) -> Result<(), S::Error> {
    sink.start_element(elem.local_name, elem.class, attributes)
}
