//! Synonym generators
//!
//! Pure functions that expand a token or phrase into alternate surface forms:
//! typo neighbourhoods, morphological variants, prefix truncations and
//! acronyms. None of them can fail; inputs that do not meet a generator's
//! precondition yield an empty vector.
//!
//! Generators may emit duplicates. Deduplication happens once per entity in
//! the index build.

/// Alphabet used for insertions and substitutions
pub const EDIT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz ";

/// Shortest input that gets an edit neighbourhood
pub const MIN_EDIT_LEN: usize = 3;

/// Suffixes stripped by [`get_morphological_variants`]
const MORPHOLOGICAL_SUFFIXES: &[&str] = &["ing"];

/// Endings appended to a stripped stem
const STEM_ENDINGS: &[&str] = &["", "e", "s", "er", "ers"];

fn assemble(parts: &[&[char]]) -> String {
    parts.iter().flat_map(|p| p.iter()).collect()
}

/// Every string at edit distance one from `entity`.
///
/// Covers insertion and substitution over [`EDIT_ALPHABET`], deletion, and
/// the swap of any two characters (adjacent or not). Swaps are trimmed and
/// dropped when they reproduce the input.
pub fn get_edits(entity: &str) -> Vec<String> {
    let chars: Vec<char> = entity.chars().collect();
    let n = chars.len();
    if n < MIN_EDIT_LEN {
        return Vec::new();
    }

    let alphabet: Vec<char> = EDIT_ALPHABET.chars().collect();
    let mut edits = Vec::with_capacity((2 * n + 1) * alphabet.len() + n * n);

    for i in 0..=n {
        let prefix = &chars[..i];

        // Insert
        for c in &alphabet {
            edits.push(assemble(&[prefix, &[*c], &chars[i..]]));
        }

        if i == n {
            continue;
        }

        let suffix = &chars[i + 1..];

        // Delete
        edits.push(assemble(&[prefix, suffix]));

        // Substitute
        for c in alphabet.iter().filter(|c| **c != chars[i]) {
            edits.push(assemble(&[prefix, &[*c], suffix]));
        }

        // Transpose
        for j in i + 1..n {
            let mut swapped = chars.clone();
            swapped.swap(i, j);
            let word: String = swapped.into_iter().collect();
            let word = word.trim();
            if word != entity {
                edits.push(word.to_string());
            }
        }
    }

    edits
}

/// Stem variants for words with a known suffix.
///
/// "running" yields "runn", "runne", "runns", "runner", "runners". Words
/// without a handled suffix, or whose stem would be empty, yield nothing.
pub fn get_morphological_variants(entity: &str) -> Vec<String> {
    let mut results = Vec::new();
    for suffix in MORPHOLOGICAL_SUFFIXES {
        if let Some(stem) = entity.strip_suffix(suffix) {
            if stem.is_empty() {
                continue;
            }
            results.extend(STEM_ENDINGS.iter().map(|end| format!("{}{}", stem, end)));
        }
    }
    results
}

/// Prefix truncations of a phrase.
///
/// Words shorter than `max_length` characters are kept whole and joined with
/// a space. Longer words are replaced by each truncation of
/// `min_length..max_length` characters, appended directly to what precedes
/// them, so "university pennsylvania" produces "upenn" and "univpenn". The
/// cartesian product of per-word choices is returned, trimmed, without the
/// original phrase.
pub fn get_prefixes(entity: &str, min_length: usize, max_length: usize) -> Vec<String> {
    let words: Vec<&str> = entity.split_whitespace().collect();
    let original = words.join(" ");

    let mut candidates = vec![String::new()];
    for word in &words {
        let chars: Vec<char> = word.chars().collect();
        let mut next = Vec::new();
        for c in &candidates {
            if chars.len() < max_length {
                next.push(format!("{} {}", c, word));
            } else {
                for len in min_length..max_length {
                    let truncated: String = chars[..len].iter().collect();
                    next.push(format!("{}{}", c, truncated));
                }
            }
        }
        candidates = next;
    }

    candidates
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty() && *c != original)
        .collect()
}

/// Acronyms of a multi-word phrase.
///
/// The initials of every word, followed by each shorter left-truncation of
/// at least two letters: "university california berkeley" gives "ucb" and
/// "uc". A single word yields nothing.
pub fn get_acronyms(entity: &str) -> Vec<String> {
    let initials: Vec<char> = entity
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .collect();

    if initials.len() < 2 {
        return Vec::new();
    }

    let mut acronyms = vec![initials.iter().collect::<String>()];
    for split in 2..initials.len() {
        acronyms.push(initials[..split].iter().collect());
    }
    acronyms
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_edits_short_input_is_empty() {
        assert!(get_edits("").is_empty());
        assert!(get_edits("ab").is_empty());
    }

    #[test]
    fn test_edits_count_for_distinct_letters() {
        // 4 insert positions * 27 + 3 deletes + 3 * 26 substitutions + 3 swaps
        assert_eq!(get_edits("abc").len(), 4 * 27 + 3 + 3 * 26 + 3);
    }

    #[test]
    fn test_edits_cover_each_primitive() {
        let edits: HashSet<String> = get_edits("penn").into_iter().collect();
        assert!(edits.contains("pen"), "deletion");
        assert!(edits.contains("pennn"), "insertion");
        assert!(edits.contains("peen"), "substitution");
        assert!(edits.contains("epnn"), "adjacent swap");
        assert!(edits.contains("nenp"), "non-adjacent swap");
        assert!(!edits.contains("penn"));
    }

    #[test]
    fn test_edits_skip_identity_swap() {
        // swapping the two n's reproduces the input
        let edits = get_edits("penn");
        assert!(edits.iter().all(|e| e != "penn"));
    }

    #[test]
    fn test_morphological_variants() {
        assert_eq!(
            get_morphological_variants("banking"),
            vec!["bank", "banke", "banks", "banker", "bankers"]
        );
        assert!(get_morphological_variants("bank").is_empty());
        assert!(get_morphological_variants("ing").is_empty());
    }

    #[test]
    fn test_token_prefixes() {
        assert_eq!(
            get_prefixes("computer", 1, 5),
            vec!["c", "co", "com", "comp"]
        );
        // short words are kept whole, which is the original phrase
        assert!(get_prefixes("penn", 1, 5).is_empty());
    }

    #[test]
    fn test_phrase_prefixes_concatenate_truncations() {
        let prefixes = get_prefixes("university pennsylvania", 1, 5);
        assert_eq!(prefixes.len(), 16);
        assert!(prefixes.contains(&"upenn".to_string()));
        assert!(prefixes.contains(&"univpenn".to_string()));
    }

    #[test]
    fn test_phrase_prefixes_keep_short_words() {
        let prefixes = get_prefixes("bank america", 3, 5);
        assert_eq!(prefixes, vec!["bankame", "bankamer"]);
        let prefixes = get_prefixes("computer lab", 3, 5);
        assert_eq!(prefixes, vec!["com lab", "comp lab"]);
    }

    #[test]
    fn test_acronyms() {
        assert_eq!(
            get_acronyms("university california berkeley"),
            vec!["ucb", "uc"]
        );
        assert_eq!(get_acronyms("university pennsylvania"), vec!["up"]);
        assert!(get_acronyms("facebook").is_empty());
        assert!(get_acronyms("").is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// One insert/delete/substitute, or a swap of two positions.
    fn is_single_edit(original: &str, candidate: &str) -> bool {
        if strsim::levenshtein(original, candidate) == 1 {
            return true;
        }
        let a: Vec<char> = original.chars().collect();
        let b: Vec<char> = candidate.chars().collect();
        if a.len() != b.len() {
            return false;
        }
        let diffs: Vec<usize> = (0..a.len()).filter(|&i| a[i] != b[i]).collect();
        diffs.len() == 2 && a[diffs[0]] == b[diffs[1]] && a[diffs[1]] == b[diffs[0]]
    }

    proptest! {
        #[test]
        fn edits_are_one_primitive_away(word in "[a-z]{3,8}") {
            for edit in get_edits(&word) {
                prop_assert_ne!(&edit, &word);
                prop_assert!(
                    is_single_edit(&word, &edit),
                    "{:?} is not one edit from {:?}", edit, word
                );
            }
        }

        #[test]
        fn prefixes_never_reproduce_or_outgrow_phrase(
            phrase in "[a-z]{1,9}( [a-z]{1,9}){0,2}",
            min in 1usize..3,
        ) {
            let len = phrase.chars().count();
            for prefix in get_prefixes(&phrase, min, 5) {
                prop_assert_ne!(&prefix, &phrase);
                prop_assert!(prefix.chars().count() <= len);
            }
        }

        #[test]
        fn acronyms_have_at_least_two_letters(phrase in "[a-z]{1,6}( [a-z]{1,6}){0,4}") {
            for acronym in get_acronyms(&phrase) {
                prop_assert!(acronym.chars().count() >= 2);
            }
        }
    }
}
