//! Error types for the entity lexicon
//!
//! Only the edges of the crate can fail: reading a schema or a configuration
//! file. Index construction and linking are infallible; an unmatched span is
//! an ordinary outcome, not an error.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for lexicon loading
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl LexiconError {
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        LexiconError::InvalidSchema {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        LexiconError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result alias for lexicon loading operations
pub type LexiconResult<T> = Result<T, LexiconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err = LexiconError::Io {
            path: PathBuf::from("config/schema.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("config/schema.yaml"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_invalid_schema_message() {
        let err = LexiconError::invalid_schema("type 'school' must be a list");
        assert_eq!(
            err.to_string(),
            "Invalid schema: type 'school' must be a list"
        );
    }
}
