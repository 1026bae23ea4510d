/*
 * front_matter.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Decode the YAML front-matter block into FrontMatter.
 */

use crate::FRONT_MATTER_DELIMITER;
use dita_markdown::{FrontMatter, MetaValue};
use yaml_rust2::{Yaml, YamlLoader};

/// Decode a raw front-matter block, fences included.
///
/// The body must be a YAML mapping. Anything else (invalid YAML, a
/// top-level sequence or scalar) falls back to a line scanner that only
/// understands `key: value` and `- item` lines. Decoding never fails.
pub fn parse_front_matter(raw: &str) -> FrontMatter {
    let body = strip_fences(raw);

    match YamlLoader::load_from_str(&body) {
        Ok(docs) => match docs.into_iter().next() {
            None | Some(Yaml::Null) => FrontMatter::new(),
            Some(Yaml::Hash(hash)) => {
                let mut header = FrontMatter::new();
                for (key, value) in hash {
                    match scalar_text(&key) {
                        Some(key) => header.insert(key, values_of(value)),
                        None => tracing::warn!(
                            key = %flow_text(&key),
                            "Skipping front-matter entry with a non-scalar key"
                        ),
                    }
                }
                header
            }
            Some(_) => {
                tracing::warn!("Front matter is not a mapping; scanning lines instead");
                scan_lines(&body)
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, "Invalid YAML front matter; scanning lines instead");
            scan_lines(&body)
        }
    }
}

/// Remove the opening fence and everything from the closing fence on.
fn strip_fences(raw: &str) -> String {
    let mut lines = raw.lines().peekable();
    if lines
        .peek()
        .is_some_and(|line| line.trim_end() == FRONT_MATTER_DELIMITER)
    {
        lines.next();
    }
    let mut body = String::new();
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == FRONT_MATTER_DELIMITER || trimmed == "..." {
            break;
        }
        body.push_str(line);
        body.push('\n');
    }
    body
}

fn values_of(value: Yaml) -> Vec<MetaValue> {
    match value {
        Yaml::Array(items) => items.iter().map(item_value).collect(),
        other => vec![item_value(&other)],
    }
}

fn item_value(value: &Yaml) -> MetaValue {
    match value {
        Yaml::Null | Yaml::BadValue | Yaml::Alias(_) => MetaValue::Null,
        Yaml::Array(_) | Yaml::Hash(_) => MetaValue::Structured(flow_text(value)),
        scalar => scalar_text(scalar).map_or(MetaValue::Null, MetaValue::Scalar),
    }
}

fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Render a YAML value on one line in flow style.
fn flow_text(value: &Yaml) -> String {
    match value {
        Yaml::Array(items) => {
            let items: Vec<String> = items.iter().map(flow_text).collect();
            format!("[{}]", items.join(", "))
        }
        Yaml::Hash(hash) => {
            let entries: Vec<String> = hash
                .iter()
                .map(|(k, v)| format!("{}: {}", flow_text(k), flow_text(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Yaml::Null | Yaml::BadValue | Yaml::Alias(_) => "~".to_string(),
        scalar => scalar_text(scalar).unwrap_or_default(),
    }
}

fn scan_lines(body: &str) -> FrontMatter {
    let mut header = FrontMatter::new();
    let mut current: Option<String> = None;

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix('-') {
            if let Some(key) = &current {
                header.push(key.clone(), MetaValue::Scalar(unquote(item.trim())));
            }
            continue;
        }

        finish_key(&mut header, current.take());
        if let Some((key, value)) = trimmed.split_once(':') {
            let key = unquote(key.trim());
            let value = value.trim();
            if value.is_empty() {
                header.insert(key.clone(), Vec::new());
                current = Some(key);
            } else {
                header.insert(key, vec![MetaValue::Scalar(unquote(value))]);
            }
        }
    }
    finish_key(&mut header, current);
    header
}

/// A `key:` line with no items underneath is a null value.
fn finish_key(header: &mut FrontMatter, key: Option<String>) {
    if let Some(key) = key {
        if header.get(&key).is_some_and(<[MetaValue]>::is_empty) {
            header.insert(key, vec![MetaValue::Null]);
        }
    }
}

fn unquote(text: &str) -> String {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    text.to_string()
}
