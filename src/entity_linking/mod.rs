//! Entity Linking
//!
//! Resolves spans of free-text tokens to canonical entities of a fixed
//! catalog despite typos, abbreviations, acronyms and inflection.
//!
//! ## Architecture
//!
//! ```text
//! Schema (type -> values)
//!     │
//!     ▼
//! EntityCatalog::load()          canonical string -> type, word counts
//!     │
//!     ▼
//! SynonymIndex::build()          edits, stems, prefixes, acronyms
//!     │                          surface -> [entity]
//!     ▼
//! Lexicon (immutable, Arc-shared)
//!     │
//!     ▼
//! EntityLinker::link(tokens)     greedy longest window, intersect, score
//!     │
//!     ▼
//! [Unresolved("i"), ..., Resolved("upenn" -> university of pennsylvania)]
//! ```

pub mod catalog;
pub mod index;
pub mod lexicon;
pub mod linker;
pub mod normalize;
pub mod schema;
pub mod service;
pub mod synonyms;

pub use catalog::{CatalogEntry, EntityCatalog, EntityId};
pub use index::{entity_synonyms, EntitySynonyms, SynonymIndex};
pub use lexicon::{Lexicon, LexiconStats};
pub use linker::{
    EntityLinker, FoundEntity, LinkMode, LinkOutput, LinkedToken, MatchScore, ResolvedSpan,
    ScoredCandidate,
};
pub use schema::Schema;
pub use service::{EntityLinkingService, EntityLinkingServiceImpl};
