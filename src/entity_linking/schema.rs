//! Schema input for catalog construction
//!
//! A schema declares, per entity type, an ordered list of canonical values.
//! Declaration order matters: when the same value appears under two types,
//! the later declaration wins in the catalog.
//!
//! Files are read with `serde_yaml`, which also accepts JSON. Two layouts
//! are supported:
//!
//! ```yaml
//! # 1. Wrapped (other top-level keys are ignored)
//! values:
//!   school: ["University of Pennsylvania"]
//!   company: ["Facebook"]
//!
//! # 2. Top-level
//! school: ["University of Pennsylvania"]
//! company: ["Facebook"]
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{LexiconError, LexiconResult};

/// Ordered `type -> values` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    types: Vec<(String, Vec<String>)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper, mostly for tests and embedding callers.
    pub fn with_values<I, S>(mut self, entity_type: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(entity_type, values);
        self
    }

    pub fn push<I, S>(&mut self, entity_type: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.push((
            entity_type.to_string(),
            values.into_iter().map(Into::into).collect(),
        ));
    }

    /// Iterate `(type, values)` in declaration order.
    pub fn types(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.types
            .iter()
            .map(|(t, values)| (t.as_str(), values.as_slice()))
    }

    /// Total number of declared values (before deduplication).
    pub fn value_count(&self) -> usize {
        self.types.iter().map(|(_, v)| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.value_count() == 0
    }

    /// Load a schema file (YAML or JSON).
    pub fn load(path: &Path) -> LexiconResult<Self> {
        info!("Loading schema from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|source| LexiconError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;

        let schema = Self::from_value(&yaml)?;
        info!(
            types = schema.types.len(),
            values = schema.value_count(),
            "Loaded schema"
        );
        Ok(schema)
    }

    /// Parse a schema from an in-memory YAML/JSON document.
    pub fn from_yaml_str(content: &str) -> LexiconResult<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LexiconError::invalid_schema(e.to_string()))?;
        Self::from_value(&yaml)
    }

    fn from_value(yaml: &serde_yaml::Value) -> LexiconResult<Self> {
        let types = yaml
            .get("values")
            .and_then(|v| v.as_mapping())
            .or_else(|| yaml.as_mapping())
            .ok_or_else(|| LexiconError::invalid_schema("expected a mapping of type -> values"))?;

        let mut schema = Schema::new();
        for (type_key, type_values) in types {
            let entity_type = type_key
                .as_str()
                .ok_or_else(|| LexiconError::invalid_schema("type names must be strings"))?;

            let seq = type_values.as_sequence().ok_or_else(|| {
                LexiconError::invalid_schema(format!("type '{}' must be a list", entity_type))
            })?;

            let values = seq
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| {
                        LexiconError::invalid_schema(format!(
                            "type '{}' contains a non-string value",
                            entity_type
                        ))
                    })
                })
                .collect::<LexiconResult<Vec<_>>>()?;

            schema.push(entity_type, values);
        }

        Ok(schema)
    }
}
