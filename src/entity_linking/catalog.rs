//! Entity catalog: canonical entity strings and their types
//!
//! The catalog is filled once from a [`Schema`] and never mutated afterwards.
//! Entities are addressed by a dense [`EntityId`] equal to their first
//! insertion position, which keeps every downstream iteration order stable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::schema::Schema;

/// Dense entity identifier (position in the catalog)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single canonical entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntityId,
    /// Lower-cased canonical string, e.g. "university of pennsylvania"
    pub entity: String,
    /// Type tag, e.g. "school"
    pub entity_type: String,
}

/// Mapping from canonical entity string to type, plus word statistics.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entries: Vec<CatalogEntry>,
    by_entity: HashMap<String, EntityId>,
    /// word -> number of distinct entities containing it (diagnostic only)
    word_counts: HashMap<String, usize>,
}

impl EntityCatalog {
    /// Build a catalog from every `(type, value)` pair of the schema.
    ///
    /// Values are lower-cased and trimmed. Empty values are skipped. When a
    /// value is declared twice the later type wins.
    pub fn load(schema: &Schema) -> Self {
        let mut catalog = Self::default();
        for (entity_type, values) in schema.types() {
            for value in values {
                catalog.add_entity(entity_type, &value.trim().to_lowercase());
            }
        }
        catalog
    }

    fn add_entity(&mut self, entity_type: &str, entity: &str) {
        if entity.is_empty() {
            warn!(entity_type, "Skipping empty entity value");
            return;
        }

        if let Some(id) = self.by_entity.get(entity) {
            let entry = &mut self.entries[id.index()];
            if entry.entity_type != entity_type {
                debug!(
                    entity,
                    old = %entry.entity_type,
                    new = entity_type,
                    "Entity redeclared, later type wins"
                );
                entry.entity_type = entity_type.to_string();
            }
            return;
        }

        for word in entity.split(' ') {
            *self.word_counts.entry(word.to_string()).or_insert(0) += 1;
        }

        let id = EntityId(self.entries.len() as u32);
        self.by_entity.insert(entity.to_string(), id);
        self.entries.push(CatalogEntry {
            id,
            entity: entity.to_string(),
            entity_type: entity_type.to_string(),
        });
    }

    pub fn get(&self, id: EntityId) -> Option<&CatalogEntry> {
        self.entries.get(id.index())
    }

    /// Lookup by exact canonical string
    pub fn lookup(&self, entity: &str) -> Option<&CatalogEntry> {
        self.by_entity.get(entity).and_then(|id| self.get(*id))
    }

    pub fn entity_type(&self, entity: &str) -> Option<&str> {
        self.lookup(entity).map(|e| e.entity_type.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn word_count(&self, word: &str) -> usize {
        self.word_counts.get(word).copied().unwrap_or(0)
    }

    pub fn word_counts(&self) -> &HashMap<String, usize> {
        &self.word_counts
    }
}
