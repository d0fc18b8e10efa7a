// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Compiled grammar handles
//!
//! A [`GrammarHandle`] pairs a display name with the C entry point of a
//! compiled tree-sitter parser. The entry point is opaque until the loader
//! invokes it.

use std::fmt;

use tree_sitter_language::LanguageFn;

/// Opaque handle to a compiled grammar
#[derive(Clone, Copy)]
pub struct GrammarHandle {
    name: &'static str,
    entry: Option<LanguageFn>,
}

impl GrammarHandle {
    /// Wrap a grammar entry point
    pub const fn new(name: &'static str, entry: LanguageFn) -> Self {
        Self {
            name,
            entry: Some(entry),
        }
    }

    /// Placeholder handle with no entry point
    pub const fn empty(name: &'static str) -> Self {
        Self { name, entry: None }
    }

    /// Handle for the PL/SQL Oracle grammar linked into this build
    ///
    /// Empty when the grammar crate was built without a parser.
    pub const fn plsqloracle() -> Self {
        Self {
            name: tree_sitter_plsqloracle::GRAMMAR_NAME,
            entry: tree_sitter_plsqloracle::LANGUAGE,
        }
    }

    /// Grammar name used in messages
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the handle has no entry point
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub(crate) fn entry(&self) -> Option<LanguageFn> {
        self.entry
    }

    /// Invoke the entry point, yielding null for an empty handle.
    pub(crate) fn raw_language(&self) -> *const () {
        match self.entry {
            // SAFETY: the entry point comes from a generated parser (or a
            // LanguageFn the caller constructed under the same contract) and
            // takes no arguments.
            Some(entry) => unsafe { (entry.into_raw())() },
            None => std::ptr::null(),
        }
    }
}

impl fmt::Debug for GrammarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarHandle")
            .field("name", &self.name)
            .field("has_entry", &self.entry.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_handle() {
        let handle = GrammarHandle::empty("placeholder");
        assert!(handle.is_empty());
        assert_eq!(handle.name(), "placeholder");
        assert!(handle.raw_language().is_null());
    }

    #[test]
    fn test_plsqloracle_handle_matches_build() {
        let handle = GrammarHandle::plsqloracle();
        assert_eq!(handle.name(), "PL/SQL Oracle");
        assert_eq!(handle.is_empty(), !tree_sitter_plsqloracle::is_compiled());
    }

    #[test]
    fn test_debug_hides_pointer() {
        let handle = GrammarHandle::empty("placeholder");
        assert_eq!(
            format!("{:?}", handle),
            "GrammarHandle { name: \"placeholder\", has_entry: false }"
        );
    }
}
