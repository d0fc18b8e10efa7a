// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for grammar checks
//!
//! [`LoadError`] is the single failure of the grammar loader. [`CheckError`]
//! wraps it together with the failures of the surrounding surfaces
//! (configuration, file access, output).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for grammar loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type alias for everything else in this crate
pub type CheckResult<T> = Result<T, CheckError>;

/// The grammar handle did not produce a usable language object
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The runtime yielded nothing usable for the handle
    #[error("Error loading {grammar} grammar")]
    LoadFailure {
        grammar: String,
        #[source]
        reason: FailureReason,
    },
}

impl LoadError {
    pub(crate) fn failure(grammar: &str, reason: FailureReason) -> Self {
        LoadError::LoadFailure {
            grammar: grammar.to_string(),
            reason,
        }
    }

    /// Name of the grammar that failed to load
    pub fn grammar(&self) -> &str {
        match self {
            LoadError::LoadFailure { grammar, .. } => grammar,
        }
    }

    /// Why the load failed
    pub fn reason(&self) -> &FailureReason {
        match self {
            LoadError::LoadFailure { reason, .. } => reason,
        }
    }
}

/// Detail attached to a [`LoadError::LoadFailure`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Placeholder handle without an entry point
    #[error("grammar handle has no language entry point")]
    MissingEntryPoint,

    /// Entry point returned a null language pointer
    #[error("language entry point returned a null pointer")]
    NullLanguage,

    /// Language table carries an ABI version the runtime cannot read
    #[error("language ABI version {found} is outside the supported range {min}..={max}")]
    IncompatibleVersion { found: usize, min: usize, max: usize },

    /// Parser refused the language
    #[error("parser rejected the language: {0}")]
    Rejected(String),
}

/// Errors raised by configuration, file access and report output
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Failed to read a file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to serialize or deserialize JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
