//! Lexicon - compiled, immutable catalog + synonym index.
//!
//! Built once from a schema and shared read-only afterwards (typically as
//! `Arc<Lexicon>`). There is no process-wide instance; callers construct
//! one and hand out references.

use std::time::Instant;

use tracing::info;

use super::catalog::{CatalogEntry, EntityCatalog, EntityId};
use super::index::SynonymIndex;
use super::schema::Schema;
use crate::config::IndexConfig;

/// Immutable entity lexicon
#[derive(Debug, Clone)]
pub struct Lexicon {
    catalog: EntityCatalog,
    index: SynonymIndex,
}

impl Lexicon {
    /// Load the catalog from `schema` and build its synonym index.
    pub fn build(schema: &Schema, config: &IndexConfig) -> Self {
        let started = Instant::now();
        let catalog = EntityCatalog::load(schema);
        let index = SynonymIndex::build(&catalog, config);
        let lexicon = Self { catalog, index };

        let stats = lexicon.stats();
        info!(
            phrases = stats.phrase_count,
            entities = stats.entity_count,
            entities_per_phrase = stats.entities_per_phrase(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Created lexicon"
        );

        lexicon
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    pub fn index(&self) -> &SynonymIndex {
        &self.index
    }

    pub fn entry(&self, id: EntityId) -> Option<&CatalogEntry> {
        self.catalog.get(id)
    }

    /// Entities a surface string can denote, in index order.
    pub fn lookup(&self, surface: &str) -> Vec<&CatalogEntry> {
        self.index
            .lookup(surface)
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .collect()
    }

    /// Statistics for debugging
    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            fingerprint: self.index.fingerprint(),
            entity_count: self.catalog.len(),
            phrase_count: self.index.len(),
            pair_count: self.index.pair_count(),
            alias_count: self.index.alias_count(),
            distinct_words: self.catalog.word_counts().len(),
        }
    }
}

/// Lexicon statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct LexiconStats {
    pub fingerprint: String,
    pub entity_count: usize,
    pub phrase_count: usize,
    pub pair_count: usize,
    pub alias_count: usize,
    pub distinct_words: usize,
}

impl LexiconStats {
    pub fn entities_per_phrase(&self) -> f64 {
        if self.phrase_count == 0 {
            0.0
        } else {
            self.pair_count as f64 / self.phrase_count as f64
        }
    }
}

impl std::fmt::Display for LexiconStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lexicon Statistics:")?;
        writeln!(f, "  Fingerprint: {}", &self.fingerprint[..16])?;
        writeln!(f, "  Entities: {}", self.entity_count)?;
        writeln!(f, "  Distinct entity words: {}", self.distinct_words)?;
        writeln!(f, "  Phrases: {}", self.phrase_count)?;
        writeln!(f, "  Aliases: {}", self.alias_count)?;
        writeln!(
            f,
            "  Entities per phrase: {:.3}",
            self.entities_per_phrase()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_lexicon() -> Lexicon {
        let schema = Schema::new()
            .with_values("school", ["University of Pennsylvania", "MIT"])
            .with_values("company", ["Facebook"]);
        Lexicon::build(&schema, &IndexConfig::default())
    }

    #[test]
    fn test_lookup_returns_entries() {
        let lexicon = make_test_lexicon();
        let hits = lexicon.lookup("upenn");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, "university of pennsylvania");
        assert_eq!(hits[0].entity_type, "school");
        assert!(lexicon.lookup("microsoft").is_empty());
    }

    #[test]
    fn test_stats() {
        let lexicon = make_test_lexicon();
        let stats = lexicon.stats();
        assert_eq!(stats.entity_count, 3);
        assert!(stats.phrase_count > 0);
        assert!(stats.entities_per_phrase() >= 1.0);
        assert_eq!(stats.fingerprint.len(), 64);
        assert!(stats.to_string().contains("Entities: 3"));
    }

    #[test]
    fn test_lexicon_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Lexicon>();
    }
}
