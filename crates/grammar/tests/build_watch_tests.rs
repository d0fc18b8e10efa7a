// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Build script rerun paths

#[path = "../build/watch.rs"]
mod watch;

use std::path::Path;

#[test]
fn test_missing_grammar_dir_is_not_watched() {
    let missing = Path::new(env!("CARGO_MANIFEST_DIR")).join("no-such-grammar-checkout");

    assert!(watch::rerun_paths(&missing).is_empty());
}

#[test]
fn test_existing_grammar_dir_is_watched() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    assert_eq!(watch::rerun_paths(dir), vec![dir.to_path_buf()]);
}
