//! EntityLinkingService - runtime interface for downstream consumers.
//!
//! Dialogue sessions hold an `Arc<dyn EntityLinkingService>` rather than a
//! concrete linker, so they can be tested against a canned implementation.
//!
//! ## Performance Requirements
//!
//! - In-memory only (no file I/O in the hot path)
//! - Bounded work per position: at most `max_window` windows

use std::sync::Arc;

use super::lexicon::Lexicon;
use super::linker::{EntityLinker, LinkMode, LinkOutput};
use crate::config::LinkerConfig;

/// Trait for entity linking implementations.
pub trait EntityLinkingService: Send + Sync {
    /// Fingerprint of the underlying lexicon (for cache invalidation).
    fn lexicon_hash(&self) -> &str;

    /// Link lower-cased, whitespace-tokenized input.
    fn link_entities(&self, tokens: &[String], mode: LinkMode) -> LinkOutput;
}

/// Standard implementation backed by a shared [`Lexicon`].
pub struct EntityLinkingServiceImpl {
    linker: EntityLinker,
    hash: String,
}

impl EntityLinkingServiceImpl {
    pub fn new(lexicon: Arc<Lexicon>, config: LinkerConfig) -> Self {
        let hash = lexicon.index().fingerprint();
        Self {
            linker: EntityLinker::new(lexicon, config),
            hash,
        }
    }

    pub fn linker(&self) -> &EntityLinker {
        &self.linker
    }
}

impl EntityLinkingService for EntityLinkingServiceImpl {
    fn lexicon_hash(&self) -> &str {
        &self.hash
    }

    fn link_entities(&self, tokens: &[String], mode: LinkMode) -> LinkOutput {
        self.linker.link_tokens(tokens, mode)
    }
}
