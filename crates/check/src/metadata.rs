// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Grammar introspection
//!
//! Reads node kinds and field names out of a loaded [`Language`] and derives
//! upper-case constant tables from them (`PROCEDURE_DEFINITION` →
//! `procedure_definition`), the shape downstream tooling uses to refer to
//! grammar rules without string typos.

use std::collections::BTreeMap;

use serde::Serialize;
use tree_sitter::Language;

/// A node kind of the grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeKind {
    pub id: u16,
    pub name: String,
    pub named: bool,
    pub visible: bool,
}

/// Everything the runtime exposes about a grammar
#[derive(Debug, Clone, Serialize)]
pub struct GrammarInfo {
    pub name: String,
    pub abi_version: usize,
    pub node_kinds: Vec<NodeKind>,
    pub fields: Vec<String>,
}

impl GrammarInfo {
    /// Collect metadata from a loaded language
    pub fn from_language(name: &str, language: &Language) -> Self {
        let node_kinds = (0..language.node_kind_count())
            .filter_map(|id| u16::try_from(id).ok())
            .filter_map(|id| {
                language.node_kind_for_id(id).map(|kind| NodeKind {
                    id,
                    name: kind.to_string(),
                    named: language.node_kind_is_named(id),
                    visible: language.node_kind_is_visible(id),
                })
            })
            .collect();

        // Field ids are 1-based; 0 means "no field".
        let fields = (1..=language.field_count())
            .filter_map(|id| u16::try_from(id).ok())
            .filter_map(|id| language.field_name_for_id(id))
            .map(str::to_string)
            .collect();

        Self {
            name: name.to_string(),
            abi_version: language.abi_version(),
            node_kinds,
            fields,
        }
    }

    /// Named, visible node kinds
    pub fn named_kinds(&self) -> impl Iterator<Item = &NodeKind> {
        self.node_kinds.iter().filter(|k| k.named && k.visible)
    }

    /// Kinds that come from grammar rules: named kinds, named aliases and
    /// hidden `_` rules. Anonymous literal tokens, the end symbol and
    /// generated repeat helpers are left out.
    pub fn rule_kinds(&self) -> impl Iterator<Item = &NodeKind> {
        self.node_kinds.iter().filter(|k| {
            k.id != 0 && (k.named || !k.visible) && !is_auxiliary(&k.name)
        })
    }

    /// Upper-case constant name → rule name, over [`rule_kinds`](Self::rule_kinds)
    pub fn rule_constants(&self) -> BTreeMap<String, String> {
        self.rule_kinds()
            .map(|k| (constant_name(&k.name), k.name.clone()))
            .collect()
    }

    /// Upper-case constant name → field name
    pub fn field_constants(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|f| (constant_name(f), f.clone()))
            .collect()
    }
}

fn constant_name(name: &str) -> String {
    name.to_uppercase()
}

/// `object_repeat1` and friends, synthesized by the generator for `repeat()`.
fn is_auxiliary(name: &str) -> bool {
    name.rsplit_once("_repeat").is_some_and(|(rule, n)| {
        !rule.is_empty() && !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_name() {
        assert_eq!(constant_name("procedure_definition"), "PROCEDURE_DEFINITION");
        assert_eq!(constant_name("string_bracket__open"), "STRING_BRACKET__OPEN");
    }

    #[test]
    fn test_is_auxiliary() {
        assert!(is_auxiliary("object_repeat1"));
        assert!(is_auxiliary("source_file_repeat12"));
        assert!(!is_auxiliary("repeat_statement"));
        assert!(!is_auxiliary("pipe_repeat"));
        assert!(!is_auxiliary("_value"));
    }

    #[test]
    fn test_constant_tables() {
        let info = GrammarInfo {
            name: "test".to_string(),
            abi_version: 14,
            node_kinds: vec![
                NodeKind {
                    id: 1,
                    name: "identifier".to_string(),
                    named: true,
                    visible: true,
                },
                NodeKind {
                    id: 2,
                    name: ";".to_string(),
                    named: false,
                    visible: true,
                },
                NodeKind {
                    id: 3,
                    name: "_hidden".to_string(),
                    named: false,
                    visible: false,
                },
                NodeKind {
                    id: 4,
                    name: "block_repeat1".to_string(),
                    named: false,
                    visible: false,
                },
                NodeKind {
                    id: 0,
                    name: "end".to_string(),
                    named: true,
                    visible: false,
                },
            ],
            fields: vec!["program_name".to_string()],
        };

        let rules = info.rule_constants();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get("IDENTIFIER").map(String::as_str), Some("identifier"));
        assert_eq!(rules.get("_HIDDEN").map(String::as_str), Some("_hidden"));
        assert!(!rules.contains_key(";"));
        assert!(!rules.contains_key("BLOCK_REPEAT1"));
        assert!(!rules.contains_key("END"));

        let fields = info.field_constants();
        assert_eq!(fields.get("PROGRAM_NAME").map(String::as_str), Some("program_name"));
    }
}
