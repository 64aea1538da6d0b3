//! Synonym index: surface string -> candidate entities
//!
//! Built once per catalog. For each entity the generators in
//! [`super::synonyms`] expand its tokens (and, for multi-word entities, the
//! whole phrase) into surface forms; every form maps back to the entity.
//!
//! Two tables are kept:
//! - `entries`: every surface form, token-level and phrase-level. Consulted
//!   per token by the linker to build candidate sets.
//! - `aliases`: forms that stand for the whole entity phrase (literal
//!   overrides, acronyms, phrase prefixes). Consulted by scoring, so that a
//!   span like "upenn" counts as an exact hit on its entity.
//!
//! Candidate order within an entry is catalog order. Ambiguity is kept; the
//! linker resolves it.

use std::collections::{HashMap, HashSet};

use sha2::{Digest, Sha256};
use smallvec::SmallVec;

use super::catalog::{CatalogEntry, EntityCatalog, EntityId};
use super::normalize::entity_tokens;
use super::synonyms::{get_acronyms, get_edits, get_morphological_variants, get_prefixes};
use crate::config::IndexConfig;

/// Candidate entities for one surface string
pub type Candidates = SmallVec<[EntityId; 4]>;

/// Order-preserving set of strings
#[derive(Debug, Default)]
struct OrderedSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedSet {
    fn insert(&mut self, s: impl Into<String>) {
        let s = s.into();
        if self.seen.insert(s.clone()) {
            self.items.push(s);
        }
    }

    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for s in iter {
            self.insert(s);
        }
    }
}

/// Surface forms generated for a single entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySynonyms {
    /// Every form, deduplicated, in generation order
    pub synonyms: Vec<String>,
    /// Whole-phrase aliases (subset of `synonyms`)
    pub aliases: Vec<String>,
}

/// Expand one catalog entry into its surface forms.
pub fn entity_synonyms(entry: &CatalogEntry, config: &IndexConfig) -> EntitySynonyms {
    let tokens = entity_tokens(&entry.entity);
    let mut synonyms = OrderedSet::default();
    let mut aliases = OrderedSet::default();

    for literal in config.literal_synonyms_for(&entry.entity) {
        synonyms.insert(literal.as_str());
        aliases.insert(literal.as_str());
    }

    // Names are not fuzzily expanded; phrase-level forms below still apply.
    let fuzzy = !config.is_fuzzy_excluded(&entry.entity_type);

    for token in &tokens {
        synonyms.insert(token.as_str());
        if fuzzy {
            synonyms.extend(get_edits(token));
            synonyms.extend(get_morphological_variants(token));
            synonyms.extend(get_prefixes(
                token,
                config.token_prefix_min,
                config.token_prefix_max,
            ));
        }
    }

    if tokens.len() > 1 {
        let phrase = tokens.join(" ");
        let phrase_forms = get_acronyms(&phrase).into_iter().chain(get_prefixes(
            &phrase,
            config.phrase_prefix_min,
            config.phrase_prefix_max,
        ));
        for form in phrase_forms {
            if form.chars().count() >= config.min_alias_len {
                aliases.insert(form.as_str());
            }
            synonyms.insert(form);
        }
    }

    EntitySynonyms {
        synonyms: synonyms.items,
        aliases: aliases.items,
    }
}

/// Reverse mapping from surface string to candidate entities.
#[derive(Debug, Clone, Default)]
pub struct SynonymIndex {
    entries: HashMap<String, Candidates>,
    aliases: HashMap<String, Candidates>,
}

impl SynonymIndex {
    /// Build the index for every entity of the catalog, in catalog order.
    pub fn build(catalog: &EntityCatalog, config: &IndexConfig) -> Self {
        let mut index = Self::default();
        for entry in catalog.iter() {
            let generated = entity_synonyms(entry, config);
            for synonym in generated.synonyms {
                index.entries.entry(synonym).or_default().push(entry.id);
            }
            for alias in generated.aliases {
                index.aliases.entry(alias).or_default().push(entry.id);
            }
        }
        index
    }

    /// Candidates for a surface string; empty when unknown.
    pub fn lookup(&self, surface: &str) -> &[EntityId] {
        self.entries
            .get(surface)
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    /// True when `surface` is a whole-phrase alias of `id`.
    pub fn is_alias(&self, surface: &str, id: EntityId) -> bool {
        self.aliases
            .get(surface)
            .map(|ids| ids.contains(&id))
            .unwrap_or(false)
    }

    /// Number of distinct surface strings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total (surface, entity) pairs
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(|c| c.len()).sum()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Deterministic SHA-256 over the sorted contents of both tables.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"synonym_index_v1");

        for (label, table) in [("entries", &self.entries), ("aliases", &self.aliases)] {
            hasher.update(label.as_bytes());
            let mut keys: Vec<&String> = table.keys().collect();
            keys.sort();
            for key in keys {
                hasher.update(key.as_bytes());
                hasher.update([0u8]);
                for id in &table[key] {
                    hasher.update(id.0.to_le_bytes());
                }
                hasher.update([0xffu8]);
            }
        }

        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_linking::schema::Schema;

    fn build(schema: &Schema) -> (EntityCatalog, SynonymIndex) {
        let catalog = EntityCatalog::load(schema);
        let index = SynonymIndex::build(&catalog, &IndexConfig::default());
        (catalog, index)
    }

    #[test]
    fn test_entity_findable_by_own_tokens() {
        let schema = Schema::new()
            .with_values("school", ["university of pennsylvania"])
            .with_values("person", ["dylan thomas"]);
        let (catalog, index) = build(&schema);

        for entry in catalog.iter() {
            for token in entity_tokens(&entry.entity) {
                assert!(
                    index.lookup(&token).contains(&entry.id),
                    "{} not indexed under {}",
                    entry.entity,
                    token
                );
            }
        }
    }

    #[test]
    fn test_phrase_level_aliases() {
        let schema = Schema::new().with_values("school", ["university of pennsylvania"]);
        let (catalog, index) = build(&schema);
        let penn = catalog.lookup("university of pennsylvania").unwrap().id;

        assert_eq!(index.lookup("upenn"), &[penn]);
        assert_eq!(index.lookup("up"), &[penn]);
        assert!(index.is_alias("upenn", penn));
        // acronym shorter than min_alias_len is indexed but not an alias
        assert!(!index.is_alias("up", penn));
        // separators are not indexed as tokens
        assert!(index.lookup("of").is_empty());
    }

    #[test]
    fn test_literal_override() {
        let schema = Schema::new().with_values("company", ["facebook"]);
        let (catalog, index) = build(&schema);
        let fb = catalog.lookup("facebook").unwrap().id;

        assert_eq!(index.lookup("fb"), &[fb]);
        assert!(index.is_alias("fb", fb));
    }

    #[test]
    fn test_person_tokens_not_fuzzy_expanded() {
        let schema = Schema::new().with_values("person", ["dylan thomas"]);
        let (catalog, index) = build(&schema);
        let dylan = catalog.lookup("dylan thomas").unwrap().id;

        assert_eq!(index.lookup("dylan"), &[dylan]);
        assert!(index.lookup("dylon").is_empty(), "no typo expansion");
        assert!(index.lookup("dyl").is_empty(), "no token prefixes");
        // phrase-level forms are still generated for names
        assert_eq!(index.lookup("dt"), &[dylan]);
        assert_eq!(index.lookup("dylathom"), &[dylan]);
    }

    #[test]
    fn test_ambiguity_preserved_in_catalog_order() {
        let schema = Schema::new()
            .with_values("school", ["boston university"])
            .with_values("company", ["boston consulting group"]);
        let (catalog, index) = build(&schema);

        let ids: Vec<_> = index
            .lookup("boston")
            .iter()
            .map(|id| catalog.get(*id).unwrap().entity.as_str())
            .collect();
        assert_eq!(ids, vec!["boston university", "boston consulting group"]);
    }

    #[test]
    fn test_each_entity_listed_once_per_surface() {
        // "penn" is both a token and a prefix of "pennsylvania"
        let schema = Schema::new().with_values("school", ["penn pennsylvania"]);
        let (_, index) = build(&schema);
        assert_eq!(index.lookup("penn").len(), 1);
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let schema = Schema::new()
            .with_values("school", ["university of california berkeley", "mit"])
            .with_values("company", ["facebook", "google"]);
        let (_, first) = build(&schema);
        let (_, second) = build(&schema);
        assert_eq!(first.fingerprint(), second.fingerprint());

        let other = Schema::new().with_values("school", ["mit"]);
        let (_, third) = build(&other);
        assert_ne!(first.fingerprint(), third.fingerprint());
    }

    #[test]
    fn test_empty_catalog() {
        let (_, index) = build(&Schema::new());
        assert!(index.is_empty());
        assert!(index.lookup("anything").is_empty());
    }
}
