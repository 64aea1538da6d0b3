//! Text normalization for entity matching
//!
//! Two concerns live here:
//! - separator folding for canonical entities (" of ", " - ", "-" become a
//!   single space) used when indexing and scoring
//! - utterance tokenization (Unicode NFKC fold, lowercase, whitespace split)
//!   for callers that hold raw text; the linker itself only consumes tokens

use unicode_normalization::UnicodeNormalization;

/// Separators folded to a single space, applied in order
const ENTITY_SEPARATORS: &[&str] = &[" of ", " - ", "-"];

/// Fold entity separators so "university of pennsylvania" indexes as
/// "university pennsylvania".
pub fn normalize_separators(entity: &str) -> String {
    let mut folded = entity.to_string();
    for sep in ENTITY_SEPARATORS {
        folded = folded.replace(sep, " ");
    }
    folded
}

/// Tokens of an entity after separator folding. Empty fragments are dropped.
pub fn entity_tokens(entity: &str) -> Vec<String> {
    normalize_separators(entity)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Entity string with hyphens replaced by spaces, used for scoring.
pub fn dehyphenate(entity: &str) -> String {
    entity.replace('-', " ")
}

/// Tokenize a raw utterance for linking.
///
/// Performs NFKC fold and lowercase, strips punctuation other than
/// in-word hyphens and apostrophes, and splits on whitespace.
///
/// # Examples
///
/// ```
/// use entity_lexicon::entity_linking::normalize::tokenize_utterance;
///
/// assert_eq!(tokenize_utterance("I went to UPenn!"), vec!["i", "went", "to", "upenn"]);
/// ```
pub fn tokenize_utterance(s: &str) -> Vec<String> {
    let folded: String = s.nfkc().collect();

    let stripped: String = folded
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();

    stripped
        .split_whitespace()
        .map(|t| t.trim_matches(|c| c == '-' || c == '\'').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
