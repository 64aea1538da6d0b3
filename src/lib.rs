//! Entity Lexicon - fuzzy entity linking against a fixed catalog
//!
//! Given a schema of canonical entities ("university of pennsylvania" is a
//! "school") and a sequence of lower-cased tokens, the lexicon finds spans
//! that refer to those entities despite misspellings, abbreviations,
//! acronyms and morphological variation.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use entity_lexicon::config::LexiconConfig;
//! use entity_lexicon::entity_linking::{EntityLinker, Lexicon, Schema};
//!
//! let config = LexiconConfig::default();
//! let schema = Schema::new()
//!     .with_values("school", ["University of Pennsylvania"])
//!     .with_values("company", ["Facebook"]);
//!
//! let lexicon = Arc::new(Lexicon::build(&schema, &config.index));
//! let linker = EntityLinker::new(lexicon, config.linker);
//!
//! let linked = linker.link(&["i", "went", "to", "upenn"]);
//! assert!(linked[3].is_resolved());
//! ```

// Core error handling
pub mod error;

// Build and linker settings
pub mod config;

// Catalog, synonym index and linker
pub mod entity_linking;

pub use config::{IndexConfig, LexiconConfig, LinkerConfig};
pub use entity_linking::{EntityLinker, Lexicon, LinkedToken, Schema};
pub use error::{LexiconError, LexiconResult};
