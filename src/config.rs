//! Lexicon configuration
//!
//! Every tunable of the index build and of the linker lives here, with
//! defaults equal to the constants the lexicon has always used. A YAML file
//! may override any subset of fields; missing fields keep their defaults.
//!
//! ```yaml
//! index:
//!   fuzzy_excluded_types: [person]
//!   literal_synonyms:
//!     facebook: [fb]
//! linker:
//!   max_window: 6
//!   stop_words: [of]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LexiconError, LexiconResult};

/// Environment variable naming a YAML config file
pub const CONFIG_ENV_VAR: &str = "LEXICON_CONFIG";

/// Words that never resolve through the near-miss (score <= 1) path.
pub const DEFAULT_COMMON_PHRASES: &[&str] = &[
    "went", "to", "and", "of", "my", "the", "names", "any", "friends", "at", "for", "in", "many",
    "partner", "all", "we", "start", "go", "school",
];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub index: IndexConfig,
    pub linker: LinkerConfig,
}

/// Synonym index build settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Types whose tokens get no edit/morphology/prefix expansion
    pub fuzzy_excluded_types: Vec<String>,
    /// Hand-written synonyms keyed by canonical entity
    pub literal_synonyms: BTreeMap<String, Vec<String>>,
    /// Per-token prefix truncation bounds (max is exclusive)
    pub token_prefix_min: usize,
    pub token_prefix_max: usize,
    /// Whole-phrase prefix truncation bounds (max is exclusive)
    pub phrase_prefix_min: usize,
    pub phrase_prefix_max: usize,
    /// Shortest generated acronym/phrase prefix registered as an alias
    pub min_alias_len: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let mut literal_synonyms = BTreeMap::new();
        literal_synonyms.insert("facebook".to_string(), vec!["fb".to_string()]);

        Self {
            fuzzy_excluded_types: vec!["person".to_string()],
            literal_synonyms,
            token_prefix_min: 1,
            token_prefix_max: 5,
            phrase_prefix_min: 1,
            phrase_prefix_max: 5,
            min_alias_len: 3,
        }
    }
}

impl IndexConfig {
    pub fn is_fuzzy_excluded(&self, entity_type: &str) -> bool {
        self.fuzzy_excluded_types.iter().any(|t| t == entity_type)
    }

    pub fn literal_synonyms_for(&self, entity: &str) -> &[String] {
        self.literal_synonyms
            .get(entity)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Online linker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Longest span (in tokens) tried at each position
    pub max_window: usize,
    /// Tokens that occupy a window slot but never narrow the candidate set
    pub stop_words: Vec<String>,
    /// Spans that are vetoed even when they score as a match
    pub common_phrases: Vec<String>,
    /// Types for which an exact single-token hit scores 0
    pub privileged_types: Vec<String>,
    /// Highest score still accepted as a match
    pub max_accept_score: usize,
    /// Apply the common-phrase veto to score-0 (privileged) matches as well
    pub veto_privileged: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            max_window: 6,
            stop_words: vec!["of".to_string()],
            common_phrases: DEFAULT_COMMON_PHRASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            privileged_types: vec!["school".to_string()],
            max_accept_score: 1,
            veto_privileged: true,
        }
    }
}

impl LexiconConfig {
    /// Load configuration from a YAML file and validate it.
    pub fn load(path: &Path) -> LexiconResult<Self> {
        info!("Loading lexicon configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|source| LexiconError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `LEXICON_CONFIG` when set, otherwise fall back to defaults.
    pub fn from_env() -> LexiconResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(&PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> LexiconResult<()> {
        let index = &self.index;
        if index.token_prefix_min == 0 || index.token_prefix_min >= index.token_prefix_max {
            return Err(LexiconError::invalid_config(format!(
                "token prefix bounds must satisfy 1 <= min < max (got {}..{})",
                index.token_prefix_min, index.token_prefix_max
            )));
        }
        if index.phrase_prefix_min == 0 || index.phrase_prefix_min >= index.phrase_prefix_max {
            return Err(LexiconError::invalid_config(format!(
                "phrase prefix bounds must satisfy 1 <= min < max (got {}..{})",
                index.phrase_prefix_min, index.phrase_prefix_max
            )));
        }
        if self.linker.max_window == 0 {
            return Err(LexiconError::invalid_config(
                "linker.max_window must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_documented_constants() {
        let config = LexiconConfig::default();
        assert_eq!(config.linker.max_window, 6);
        assert_eq!(config.linker.stop_words, vec!["of"]);
        assert!(config.linker.common_phrases.contains(&"school".to_string()));
        assert_eq!(config.linker.common_phrases.len(), 19);
        assert_eq!(config.index.literal_synonyms_for("facebook"), ["fb"]);
        assert!(config.index.is_fuzzy_excluded("person"));
        assert!(!config.index.is_fuzzy_excluded("school"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.yaml");
        std::fs::write(
            &path,
            "linker:\n  max_window: 3\n  veto_privileged: false\n",
        )
        .unwrap();

        let config = LexiconConfig::load(&path).unwrap();
        assert_eq!(config.linker.max_window, 3);
        assert!(!config.linker.veto_privileged);
        assert_eq!(config.linker.stop_words, vec!["of"]);
        assert_eq!(config.index, IndexConfig::default());
    }

    #[test]
    fn test_invalid_prefix_bounds_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.yaml");
        std::fs::write(&path, "index:\n  phrase_prefix_min: 5\n  phrase_prefix_max: 5\n").unwrap();

        let err = LexiconConfig::load(&path).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidConfig { .. }));
    }

    #[test]
    fn test_from_env_reads_named_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.yaml");
        std::fs::write(&path, "linker:\n  max_window: 2\n").unwrap();

        // Only this test touches the variable
        std::env::set_var(CONFIG_ENV_VAR, &path);
        let loaded = LexiconConfig::from_env();
        std::env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(loaded.unwrap().linker.max_window, 2);

        assert_eq!(LexiconConfig::from_env().unwrap(), LexiconConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = LexiconConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }));
    }
}
