use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[path = "build/watch.rs"]
mod watch;

/// Environment variable pointing at a checkout of the PL/SQL Oracle grammar
/// (the directory holding `grammar.js` and `src/`).
const GRAMMAR_DIR_ENV: &str = "PLSQLORACLE_GRAMMAR_DIR";

fn main() {
    println!("cargo::rustc-check-cfg=cfg(plsqloracle_grammar)");
    println!("cargo:rerun-if-env-changed={}", GRAMMAR_DIR_ENV);

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let grammar_dir = env::var_os(GRAMMAR_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| manifest_dir.join("grammar"));

    for path in watch::rerun_paths(&grammar_dir) {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    let node_types_out = out_dir.join("node-types.json");

    let Some(src_dir) = locate_parser_sources(&grammar_dir, &out_dir) else {
        println!(
            "cargo:warning=PL/SQL Oracle grammar not found in {}; set {} to link the parser",
            grammar_dir.display(),
            GRAMMAR_DIR_ENV
        );
        fs::write(&node_types_out, "[]").expect("Failed to write node-types.json");
        return;
    };

    // Hand-written scanner stays next to grammar.js even when parser.c was
    // generated into OUT_DIR.
    let scanner_c = [src_dir.join("scanner.c"), grammar_dir.join("src/scanner.c")]
        .into_iter()
        .find(|p| p.exists());

    let parser_c = src_dir.join("parser.c");
    println!("cargo:rerun-if-changed={}", parser_c.display());

    let mut build = cc::Build::new();
    build
        .include(&src_dir)
        .include(grammar_dir.join("src"))
        .flag_if_supported("-std=c11")
        .warnings(false)
        .flag_if_supported("-Wno-unused-parameter")
        .flag_if_supported("-Wno-unused-but-set-variable")
        .flag_if_supported("-Wno-trigraphs")
        .file(&parser_c);

    if let Some(scanner_c) = &scanner_c {
        println!("cargo:rerun-if-changed={}", scanner_c.display());
        build.file(scanner_c);
    }

    build.compile("tree_sitter_plsqloracle");

    let node_types = src_dir.join("node-types.json");
    if node_types.exists() {
        fs::copy(&node_types, &node_types_out).expect("Failed to copy node-types.json");
    } else {
        fs::write(&node_types_out, "[]").expect("Failed to write node-types.json");
    }

    println!("cargo:rustc-cfg=plsqloracle_grammar");
}

/// Find a directory containing `parser.c`, generating one with tree-sitter-cli
/// when the grammar checkout only carries `grammar.js`.
fn locate_parser_sources(grammar_dir: &Path, out_dir: &Path) -> Option<PathBuf> {
    let checked_in = grammar_dir.join("src");
    if checked_in.join("parser.c").exists() {
        return Some(checked_in);
    }

    if !grammar_dir.join("grammar.js").exists() {
        return None;
    }

    let gen_dir = out_dir.join("src");
    let status = Command::new("tree-sitter")
        .arg("generate")
        .arg("-o")
        .arg(&gen_dir)
        .current_dir(grammar_dir)
        .status();

    match status {
        Ok(s) if s.success() => {
            println!("cargo:warning=Generated PL/SQL Oracle parser into {}", gen_dir.display());
        }
        Ok(s) => {
            println!(
                "cargo:warning=Failed to generate PL/SQL Oracle grammar: exit code {:?}",
                s.code()
            );
            return None;
        }
        Err(e) => {
            println!("cargo:warning=Failed to run tree-sitter: {}", e);
            println!("cargo:warning=Install tree-sitter-cli: npm install -g tree-sitter-cli");
            return None;
        }
    }

    gen_dir.join("parser.c").exists().then_some(gen_dir)
}
