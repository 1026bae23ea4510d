/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde::{Deserialize, Serialize};

/// Serializer options, fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SerializerConfig {
    /// Treat the front-matter `id` key as the topic identifier instead of
    /// generic metadata.
    #[serde(default)]
    pub identifier_from_metadata: bool,
}

impl SerializerConfig {
    pub fn with_identifier_from_metadata(mut self, enabled: bool) -> Self {
        self.identifier_from_metadata = enabled;
        self
    }
}
