// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Command line exit status and output

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plsqloracle-check"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run plsqloracle-check")
}

#[test]
fn test_load_reports_status() {
    let output = run(&["load"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if tree_sitter_plsqloracle::is_compiled() {
        assert!(output.status.success(), "stderr: {}", stderr);
        assert!(stdout.contains("PL/SQL Oracle grammar loaded 1 time(s)"));
    } else {
        assert_eq!(output.status.code(), Some(1));
        assert!(stdout.is_empty());
        // Printed once, not repeated by logging
        assert_eq!(
            stderr.matches("Error loading PL/SQL Oracle grammar").count(),
            1,
            "stderr: {}",
            stderr
        );
        assert!(stderr.contains("grammar handle has no language entry point"));
    }
}

#[test]
fn test_default_command_is_load() {
    let explicit = run(&["load"]);
    let implicit = run(&[]);

    assert_eq!(explicit.status.code(), implicit.status.code());
}

#[test]
fn test_load_rejects_zero_repeat() {
    let output = run(&["load", "--repeat", "0"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("repeat must be at least 1"));
}

#[test]
fn test_parse_without_files_fails() {
    let output = run(&["parse"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No files to parse"));
}

#[test]
fn test_config_file_errors_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("check.json");
    std::fs::write(&path, r#"{ "max_issues": 0 }"#).unwrap();

    let output = run(&["--config", path.to_str().unwrap(), "parse", "a.sql"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_issues must be at least 1"));
}
