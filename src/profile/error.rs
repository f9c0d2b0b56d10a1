//! Registry error types

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`RegistryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source could not be read at all
    Io,
    /// The source is not well-formed YAML, or a value has the wrong type
    Parse,
    /// Well-formed document that breaks a profile invariant
    Validation,
    /// Lookup of an unknown profile key
    NotFound,
}

/// A single invariant violation found while validating a profile
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    DuplicateKey,
    MissingDisplayName,
    MissingLlmOptions,
    MissingModel,
    MissingSystemPrompt,
    TemperatureOutOfRange(f64),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::DuplicateKey => write!(f, "profile key is defined more than once"),
            Problem::MissingDisplayName => write!(f, "missing or empty `display_name`"),
            Problem::MissingLlmOptions => write!(f, "missing `llm_options`"),
            Problem::MissingModel => write!(f, "missing or empty `llm_options.model`"),
            Problem::MissingSystemPrompt => write!(f, "missing `system_prompt`"),
            Problem::TemperatureOutOfRange(t) => {
                write!(f, "`llm_options.temperature` {} is outside [0.0, 2.0]", t)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read profiles from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed profile document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Section '{0}' not found in profile document")]
    MissingSection(String),

    #[error("Invalid profile '{key}': {problem}")]
    Validation { key: String, problem: Problem },

    #[error("Profile '{0}' not found")]
    NotFound(String),
}

impl RegistryError {
    pub fn invalid(key: impl Into<String>, problem: Problem) -> Self {
        Self::Validation {
            key: key.into(),
            problem,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Io { .. } => ErrorKind::Io,
            RegistryError::Parse(_) => ErrorKind::Parse,
            RegistryError::MissingSection(_) | RegistryError::Validation { .. } => ErrorKind::Validation,
            RegistryError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}
