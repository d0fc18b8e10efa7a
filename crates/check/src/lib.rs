// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # PL/SQL Oracle grammar check
//!
//! Verifies that a compiled tree-sitter grammar loads, and offers the tooling
//! built on a loaded grammar.
//!
//! ## Modules
//!
//! - [`handle`]: opaque compiled-grammar handles
//! - [`loader`]: the load check itself
//! - [`metadata`]: node kinds, fields and constant tables of a grammar
//! - [`diagnostics`]: syntax issues in source text
//! - [`config`]: tool configuration
//! - [`error`]: error types
//!
//! ## Usage
//!
//! ```rust
//! use plsqloracle_check::{GrammarHandle, load};
//!
//! match load(&GrammarHandle::plsqloracle()) {
//!     Ok(language) => assert!(language.node_kind_count() > 0),
//!     Err(e) => assert_eq!(e.to_string(), "Error loading PL/SQL Oracle grammar"),
//! }
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod loader;
pub mod metadata;

pub use config::{CheckConfig, OutputFormat};
pub use diagnostics::{IssueKind, ParseReport, SourceChecker, SyntaxIssue};
pub use error::{CheckError, CheckResult, FailureReason, LoadError, LoadResult};
pub use handle::GrammarHandle;
pub use loader::{LoadReport, check, load};
pub use metadata::{GrammarInfo, NodeKind};
