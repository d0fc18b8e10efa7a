// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! PL/SQL Oracle Grammar
//!
//! This crate provides the tree-sitter grammar for PL/SQL with Oracle flavor.
//!
//! The parser is compiled by the build script from a grammar checkout located
//! via `PLSQLORACLE_GRAMMAR_DIR`. When no checkout is available the crate still
//! builds, and [`LANGUAGE`] is `None`.
//!
//! ## Usage
//!
//! ```rust
//! let language = tree_sitter_plsqloracle::LANGUAGE.map(tree_sitter::Language::new);
//! assert_eq!(language.is_some(), tree_sitter_plsqloracle::is_compiled());
//! ```

use tree_sitter_language::LanguageFn;

/// Human readable grammar name, used in diagnostics.
pub const GRAMMAR_NAME: &str = "PL/SQL Oracle";

/// Name of the C entry point exported by the generated parser.
pub const C_SYMBOL: &str = "tree_sitter_plsqloracle";

/// The content of the grammar's `node-types.json`.
///
/// `"[]"` when the parser was not compiled.
pub const NODE_TYPES: &str = include_str!(concat!(env!("OUT_DIR"), "/node-types.json"));

#[cfg(plsqloracle_grammar)]
unsafe extern "C" {
    fn tree_sitter_plsqloracle() -> *const ();
}

/// The compiled grammar handle, if the parser was linked into this build.
#[cfg(plsqloracle_grammar)]
pub const LANGUAGE: Option<LanguageFn> =
    Some(unsafe { LanguageFn::from_raw(tree_sitter_plsqloracle) });

/// The compiled grammar handle, if the parser was linked into this build.
#[cfg(not(plsqloracle_grammar))]
pub const LANGUAGE: Option<LanguageFn> = None;

/// Whether the parser was compiled and linked into this build.
pub const fn is_compiled() -> bool {
    LANGUAGE.is_some()
}
