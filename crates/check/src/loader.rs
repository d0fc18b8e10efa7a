// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Grammar loader check
//!
//! Turns a [`GrammarHandle`] into a [`tree_sitter::Language`] and verifies the
//! runtime accepts it.
//!
//! ## Checks
//!
//! ```text
//! GrammarHandle
//!     ├─→ entry point present?          MissingEntryPoint
//!     ├─→ language pointer non-null?    NullLanguage
//!     ├─→ ABI version supported?        IncompatibleVersion
//!     └─→ Parser::set_language ok?      Rejected
//! ```
//!
//! Every failure surfaces as [`LoadError::LoadFailure`]. Nothing is retried.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;
use tree_sitter::{LANGUAGE_VERSION, Language, MIN_COMPATIBLE_LANGUAGE_VERSION, Parser};

use crate::error::{FailureReason, LoadError, LoadResult};
use crate::handle::GrammarHandle;

/// Load the language behind a grammar handle
///
/// # Returns
///
/// - `Ok(Language)` - The runtime accepted the grammar
/// - `Err(LoadError::LoadFailure)` - The handle is empty, null, or unusable
pub fn load(handle: &GrammarHandle) -> LoadResult<Language> {
    debug!("Loading {} grammar", handle.name());

    let result = try_load(handle);
    if let Err(LoadError::LoadFailure { grammar, reason }) = &result {
        debug!("Error loading {} grammar: {}", grammar, reason);
    }
    result
}

fn try_load(handle: &GrammarHandle) -> LoadResult<Language> {
    let Some(entry) = handle.entry() else {
        return Err(LoadError::failure(handle.name(), FailureReason::MissingEntryPoint));
    };

    if handle.raw_language().is_null() {
        return Err(LoadError::failure(handle.name(), FailureReason::NullLanguage));
    }

    let language = Language::new(entry);

    let version = language.abi_version();
    if !(MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version) {
        return Err(LoadError::failure(
            handle.name(),
            FailureReason::IncompatibleVersion {
                found: version,
                min: MIN_COMPATIBLE_LANGUAGE_VERSION,
                max: LANGUAGE_VERSION,
            },
        ));
    }

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| LoadError::failure(handle.name(), FailureReason::Rejected(e.to_string())))?;

    debug!(
        "Loaded {} grammar (ABI {}, {} node kinds)",
        handle.name(),
        version,
        language.node_kind_count()
    );

    Ok(language)
}

/// Summary of a successful [`check`]
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Grammar name
    pub grammar: String,

    /// ABI version of the language table
    pub abi_version: usize,

    /// Number of node kinds, named and anonymous
    pub node_kind_count: usize,

    /// Number of field names
    pub field_count: usize,

    /// How many times the handle was loaded
    pub attempts: usize,

    /// Total time spent loading
    pub elapsed: Duration,
}

/// Load a handle `repeat` times and report the result
///
/// A `repeat` of zero is treated as one. Stops at the first failure; a handle
/// that loads once must load every time.
pub fn check(handle: &GrammarHandle, repeat: usize) -> LoadResult<LoadReport> {
    let attempts = repeat.max(1);
    let start = Instant::now();

    let mut language = load(handle)?;
    for attempt in 1..attempts {
        debug!("Reload {} of {} grammar", attempt + 1, handle.name());
        language = load(handle)?;
    }

    Ok(LoadReport {
        grammar: handle.name().to_string(),
        abi_version: language.abi_version(),
        node_kind_count: language.node_kind_count(),
        field_count: language.field_count(),
        attempts,
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn null_language() -> *const () {
        std::ptr::null()
    }

    #[test]
    fn test_load_empty_handle() {
        let err = load(&GrammarHandle::empty("placeholder")).unwrap_err();
        assert_eq!(err.to_string(), "Error loading placeholder grammar");
        assert_eq!(err.reason(), &FailureReason::MissingEntryPoint);
    }

    #[test]
    fn test_load_null_entry_point() {
        let entry = unsafe { tree_sitter_language::LanguageFn::from_raw(null_language) };
        let err = load(&GrammarHandle::new("null", entry)).unwrap_err();
        assert_eq!(err.reason(), &FailureReason::NullLanguage);
    }

    #[test]
    fn test_check_stops_on_failure() {
        let err = check(&GrammarHandle::empty("placeholder"), 5).unwrap_err();
        assert_eq!(err.grammar(), "placeholder");
    }
}
