// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Check Configuration
//!
//! Settings for the `plsqloracle-check` tool. Loaded from a JSON file; every
//! field is optional and command-line flags override what the file says.
//!
//! ## Example
//!
//! ```json
//! {
//!     "repeat": 3,
//!     "max_issues": 20,
//!     "format": "json",
//!     "samples": ["samples/package_body.sql"]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostics::DEFAULT_MAX_ISSUES;
use crate::error::{CheckError, CheckResult};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable lines
    #[default]
    Text,
    /// Pretty printed JSON
    Json,
}

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// How many times the load check loads the grammar
    pub repeat: usize,

    /// Cap on reported syntax issues per file
    pub max_issues: usize,

    /// Report format
    pub format: OutputFormat,

    /// Files parsed by `parse` when none are given on the command line
    pub samples: Vec<PathBuf>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            repeat: 1,
            max_issues: DEFAULT_MAX_ISSUES,
            format: OutputFormat::Text,
            samples: Vec::new(),
        }
    }
}

impl CheckConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> CheckResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    ///
    /// Relative sample paths are resolved against the file's directory.
    pub fn from_file(path: &Path) -> CheckResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json_str(&content)?;
        if let Some(base) = path.parent() {
            config.samples = config
                .samples
                .into_iter()
                .map(|p| if p.is_relative() { base.join(p) } else { p })
                .collect();
        }
        Ok(config)
    }

    /// Set the load repeat count
    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the issue cap
    pub fn with_max_issues(mut self, max_issues: usize) -> Self {
        self.max_issues = max_issues;
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Add a sample file
    pub fn with_sample(mut self, path: impl Into<PathBuf>) -> Self {
        self.samples.push(path.into());
        self
    }

    /// Reject values the tool cannot act on
    pub fn validate(&self) -> CheckResult<()> {
        if self.repeat == 0 {
            return Err(CheckError::Config("repeat must be at least 1".to_string()));
        }
        if self.max_issues == 0 {
            return Err(CheckError::Config("max_issues must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::new();
        assert_eq!(config.repeat, 1);
        assert_eq!(config.max_issues, DEFAULT_MAX_ISSUES);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.samples.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CheckConfig::from_json_str(r#"{ "repeat": 4 }"#).unwrap();
        assert_eq!(config.repeat, 4);
        assert_eq!(config.max_issues, DEFAULT_MAX_ISSUES);
    }

    #[test]
    fn test_format_parses_lowercase() {
        let config = CheckConfig::from_json_str(r#"{ "format": "json" }"#).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CheckConfig::from_json_str(r#"{ "retries": 2 }"#).unwrap_err();
        assert!(matches!(err, CheckError::Json(_)));
    }

    #[test]
    fn test_zero_repeat_rejected() {
        let err = CheckConfig::from_json_str(r#"{ "repeat": 0 }"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: repeat must be at least 1");
    }

    #[test]
    fn test_builder() {
        let config = CheckConfig::new()
            .with_repeat(3)
            .with_max_issues(5)
            .with_format(OutputFormat::Json)
            .with_sample("a.sql");
        assert_eq!(config.repeat, 3);
        assert_eq!(config.max_issues, 5);
        assert_eq!(config.samples, vec![PathBuf::from("a.sql")]);
    }
}
