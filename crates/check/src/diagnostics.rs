// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Source diagnostics
//!
//! Parses source text with a loaded grammar and reports the ERROR and MISSING
//! nodes in the resulting tree.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plsqloracle_check::{GrammarHandle, SourceChecker, load};
//!
//! let language = load(&GrammarHandle::plsqloracle())?;
//! let mut checker = SourceChecker::new(&language)?;
//!
//! let report = checker.check_source("BEGIN NULL; END;");
//! for issue in &report.issues {
//!     println!("{}", issue);
//! }
//! ```

use std::fmt;

use serde::Serialize;
use tracing::debug;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::{FailureReason, LoadError, LoadResult};

/// Default cap on reported issues per source
pub const DEFAULT_MAX_ISSUES: usize = 50;

/// Kind of syntax issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Input the grammar could not match
    Error,
    /// Token the parser inserted to recover
    Missing,
}

/// A syntax issue found in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxIssue {
    pub kind: IssueKind,
    /// Zero-based row
    pub row: usize,
    /// Zero-based byte column
    pub column: usize,
    pub node_kind: String,
    pub text: String,
}

impl fmt::Display for SyntaxIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::Error => write!(
                f,
                "{}:{}: syntax error near {:?}",
                self.row + 1,
                self.column + 1,
                self.text
            ),
            IssueKind::Missing => write!(
                f,
                "{}:{}: missing {}",
                self.row + 1,
                self.column + 1,
                self.node_kind
            ),
        }
    }
}

/// Outcome of checking one source text
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    /// No issues were found
    pub clean: bool,
    /// Issues in document order, at most `max_issues`
    pub issues: Vec<SyntaxIssue>,
    /// Issues were dropped because of the cap
    pub truncated: bool,
}

/// Parses sources with one grammar
pub struct SourceChecker {
    parser: Parser,
    max_issues: usize,
}

impl SourceChecker {
    /// Create a checker for a loaded language
    pub fn new(language: &Language) -> LoadResult<Self> {
        let mut parser = Parser::new();
        parser.set_language(language).map_err(|e| {
            LoadError::failure(
                language.name().unwrap_or("unknown"),
                FailureReason::Rejected(e.to_string()),
            )
        })?;

        Ok(Self {
            parser,
            max_issues: DEFAULT_MAX_ISSUES,
        })
    }

    /// Cap the number of issues kept per report
    pub fn with_max_issues(mut self, max_issues: usize) -> Self {
        self.max_issues = max_issues;
        self
    }

    /// Parse `text` and collect its syntax issues
    pub fn check_source(&mut self, text: &str) -> ParseReport {
        debug!("Checking {} bytes of source", text.len());

        let Some(tree) = self.parser.parse(text, None) else {
            // Only happens on cancellation or timeout, neither of which is set.
            return ParseReport {
                clean: false,
                issues: Vec::new(),
                truncated: false,
            };
        };

        let mut issues = collect_issues(&tree, text);
        let truncated = issues.len() > self.max_issues;
        issues.truncate(self.max_issues);

        ParseReport {
            clean: issues.is_empty() && !tree.root_node().has_error(),
            issues,
            truncated,
        }
    }
}

/// Collect ERROR and MISSING nodes in document order
fn collect_issues(tree: &Tree, text: &str) -> Vec<SyntaxIssue> {
    let mut issues = Vec::new();
    find_issue_nodes(&tree.root_node(), text, &mut issues);
    issues
}

fn find_issue_nodes(node: &Node, text: &str, issues: &mut Vec<SyntaxIssue>) {
    if !node.has_error() {
        return;
    }

    if node.is_error() || node.is_missing() {
        let kind = if node.is_missing() {
            IssueKind::Missing
        } else {
            IssueKind::Error
        };

        let position = node.start_position();
        let snippet = text
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("<invalid bytes>");

        issues.push(SyntaxIssue {
            kind,
            row: position.row,
            column: position.column,
            node_kind: node.kind().to_string(),
            text: snippet.to_string(),
        });

        // The whole ERROR subtree is already reported.
        if node.is_error() {
            return;
        }
    }

    for child in node.children(&mut node.walk()) {
        find_issue_nodes(&child, text, issues);
    }
}
