//! Entity linker: greedy longest-span matching over a token sequence
//!
//! For each position the linker tries windows from `max_window` tokens down
//! to one. A window's candidate set is the index entry of its first token,
//! narrowed by intersection with the entry of every later token that is not
//! a stop word, so "university of penn" narrows through "university" ∩ "penn"
//! and then matches as a substring of "university of pennsylvania". Surviving
//! candidates are scored against the span and the best one is accepted when
//! its score is at most `max_accept_score`. A window whose candidates all
//! score too high falls through to the next shorter window.
//!
//! ## Scoring
//!
//! | Rule | Score |
//! |------|-------|
//! | span is one of the entity's tokens and the type is privileged | 0 |
//! | multi-token span is a substring of the entity | 0 |
//! | span is a whole-phrase alias of the entity | 0 |
//! | otherwise | Levenshtein(span, entity) |
//!
//! Ties keep candidate order (stable sort), so output is deterministic.
//! Spans in the common-phrase set are vetoed.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::catalog::{CatalogEntry, EntityId};
use super::lexicon::Lexicon;
use super::normalize::dehyphenate;
use crate::config::LinkerConfig;

/// A span resolved to a catalog entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSpan {
    /// Input tokens joined by single spaces
    pub phrase: String,
    /// Canonical entity string
    pub entity: String,
    pub entity_type: String,
}

/// One item of linker output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkedToken {
    /// Token passed through verbatim
    Unresolved(String),
    Resolved(ResolvedSpan),
}

impl LinkedToken {
    pub fn resolved(phrase: &str, entity: &str, entity_type: &str) -> Self {
        LinkedToken::Resolved(ResolvedSpan {
            phrase: phrase.to_string(),
            entity: entity.to_string(),
            entity_type: entity_type.to_string(),
        })
    }

    pub fn unresolved(token: &str) -> Self {
        LinkedToken::Unresolved(token.to_string())
    }

    /// Surface text covered by this item
    pub fn text(&self) -> &str {
        match self {
            LinkedToken::Unresolved(token) => token,
            LinkedToken::Resolved(span) => &span.phrase,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, LinkedToken::Resolved(_))
    }

    pub fn as_resolved(&self) -> Option<&ResolvedSpan> {
        match self {
            LinkedToken::Resolved(span) => Some(span),
            LinkedToken::Unresolved(_) => None,
        }
    }
}

impl fmt::Display for LinkedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkedToken::Unresolved(token) => write!(f, "{}", token),
            LinkedToken::Resolved(span) => write!(
                f,
                "[{} -> {} ({})]",
                span.phrase, span.entity, span.entity_type
            ),
        }
    }
}

/// `(matched phrase, canonical entity)` pair for per-dialogue statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundEntity {
    pub phrase: String,
    pub entity: String,
}

/// Selects what [`EntityLinker::link_tokens`] returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    /// Linked tokens only
    #[default]
    Tokens,
    /// Linked tokens plus the flat list of found entities
    WithEntities,
}

/// Result of a link call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkOutput {
    pub tokens: Vec<LinkedToken>,
    /// Empty unless requested with [`LinkMode::WithEntities`]
    pub entities: Vec<FoundEntity>,
}

/// How a candidate scored against a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScore {
    /// Span is one of the entity's tokens (privileged types only)
    ExactToken,
    /// Multi-token span contained in the entity
    Substring,
    /// Span is a whole-phrase alias (acronym, phrase prefix, override)
    Alias,
    EditDistance(usize),
}

impl MatchScore {
    pub fn value(self) -> usize {
        match self {
            MatchScore::ExactToken | MatchScore::Substring | MatchScore::Alias => 0,
            MatchScore::EditDistance(d) => d,
        }
    }

    /// Score came from one of the score-0 rules rather than edit distance
    pub fn is_privileged(self) -> bool {
        !matches!(self, MatchScore::EditDistance(_))
    }
}

/// A candidate with its score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub id: EntityId,
    pub score: MatchScore,
}

/// Online linker over a shared, immutable lexicon.
#[derive(Debug, Clone)]
pub struct EntityLinker {
    lexicon: Arc<Lexicon>,
    config: LinkerConfig,
    stop_words: HashSet<String>,
    common_phrases: HashSet<String>,
    privileged_types: HashSet<String>,
}

impl EntityLinker {
    pub fn new(lexicon: Arc<Lexicon>, config: LinkerConfig) -> Self {
        let stop_words = config.stop_words.iter().cloned().collect();
        let common_phrases = config.common_phrases.iter().cloned().collect();
        let privileged_types = config.privileged_types.iter().cloned().collect();
        Self {
            lexicon,
            config,
            stop_words,
            common_phrases,
            privileged_types,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Link a token sequence.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use entity_lexicon::config::{IndexConfig, LinkerConfig};
    /// use entity_lexicon::entity_linking::{EntityLinker, Lexicon, LinkedToken, Schema};
    ///
    /// let schema = Schema::new().with_values("company", ["facebook"]);
    /// let lexicon = Arc::new(Lexicon::build(&schema, &IndexConfig::default()));
    /// let linker = EntityLinker::new(lexicon, LinkerConfig::default());
    ///
    /// let linked = linker.link(&["i", "work", "at", "fb"]);
    /// assert_eq!(linked[3], LinkedToken::resolved("fb", "facebook", "company"));
    /// ```
    pub fn link<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<LinkedToken> {
        self.link_tokens(tokens, LinkMode::Tokens).tokens
    }

    /// Link a token sequence and also return `(phrase, entity)` pairs.
    pub fn link_with_entities<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> (Vec<LinkedToken>, Vec<FoundEntity>) {
        let output = self.link_tokens(tokens, LinkMode::WithEntities);
        (output.tokens, output.entities)
    }

    /// Single left-to-right pass, longest window first.
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
    pub fn link_tokens<S: AsRef<str>>(&self, tokens: &[S], mode: LinkMode) -> LinkOutput {
        let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
        let mut output = LinkOutput::default();

        let mut i = 0;
        while i < tokens.len() {
            match self.match_at(&tokens[i..]) {
                Some((len, phrase, entry)) => {
                    debug!(
                        phrase = %phrase,
                        entity = %entry.entity,
                        entity_type = %entry.entity_type,
                        "Linked span"
                    );
                    if mode == LinkMode::WithEntities {
                        output.entities.push(FoundEntity {
                            phrase: phrase.clone(),
                            entity: entry.entity.clone(),
                        });
                    }
                    output.tokens.push(LinkedToken::Resolved(ResolvedSpan {
                        phrase,
                        entity: entry.entity.clone(),
                        entity_type: entry.entity_type.clone(),
                    }));
                    i += len;
                }
                None => {
                    output.tokens.push(LinkedToken::unresolved(tokens[i]));
                    i += 1;
                }
            }
        }

        output
    }

    /// Longest window starting at `tokens[0]` that resolves to an entity.
    fn match_at(&self, tokens: &[&str]) -> Option<(usize, String, &CatalogEntry)> {
        let longest = self.config.max_window.min(tokens.len());

        for len in (1..=longest).rev() {
            let window = &tokens[..len];

            // One-letter tokens are noise
            if len == 1 && window[0].chars().count() == 1 {
                return None;
            }

            let candidates = self.candidates(window);
            if candidates.is_empty() {
                continue;
            }

            let phrase = window.join(" ");
            trace!(phrase = %phrase, candidates = candidates.len(), "Scoring window");
            if let Some(entry) = self.score_and_match(&phrase, &candidates) {
                return Some((len, phrase, entry));
            }
        }

        None
    }

    /// Candidate entities for a window: the first token's entry intersected
    /// with the entries of all later non-stop-word tokens.
    pub fn candidates(&self, window: &[&str]) -> Vec<EntityId> {
        let index = self.lexicon.index();
        let Some((first, rest)) = window.split_first() else {
            return Vec::new();
        };

        let mut candidates = index.lookup(first).to_vec();
        for token in rest {
            if candidates.is_empty() {
                break;
            }
            if self.stop_words.contains(*token) {
                continue;
            }
            let entry = index.lookup(token);
            candidates.retain(|id| entry.contains(id));
        }
        candidates
    }

    /// Score one candidate entity against a span.
    pub fn score(&self, span: &str, entry: &CatalogEntry) -> MatchScore {
        let normalized = dehyphenate(&entry.entity);

        if self.privileged_types.contains(&entry.entity_type)
            && normalized.split_whitespace().any(|t| t == span)
        {
            return MatchScore::ExactToken;
        }
        if span.split_whitespace().count() > 1 && normalized.contains(span) {
            return MatchScore::Substring;
        }
        if self.lexicon.index().is_alias(span, entry.id) {
            return MatchScore::Alias;
        }
        MatchScore::EditDistance(strsim::levenshtein(span, &entry.entity))
    }

    /// Candidates scored and sorted ascending; ties keep input order.
    pub fn rank(&self, span: &str, candidates: &[EntityId]) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .filter_map(|id| {
                let entry = self.lexicon.entry(*id)?;
                Some(ScoredCandidate {
                    id: *id,
                    score: self.score(span, entry),
                })
            })
            .collect();
        scored.sort_by_key(|c| c.score.value());
        scored
    }

    /// Best entity for `span`, or `None` when the best score is too high or
    /// the span is a vetoed common phrase.
    pub fn score_and_match(&self, span: &str, candidates: &[EntityId]) -> Option<&CatalogEntry> {
        let best = *self.rank(span, candidates).first()?;

        if best.score.value() > self.config.max_accept_score {
            return None;
        }

        if self.common_phrases.contains(span)
            && (!best.score.is_privileged() || self.config.veto_privileged)
        {
            trace!(span, "Common phrase vetoed");
            return None;
        }

        self.lexicon.entry(best.id)
    }
}
