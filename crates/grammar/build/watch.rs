use std::path::{Path, PathBuf};

/// Paths the build script should be re-run for.
///
/// A missing path counts as always stale, so only existing ones are watched.
/// Without a checkout the env var alone triggers rebuilds.
pub fn rerun_paths(grammar_dir: &Path) -> Vec<PathBuf> {
    if grammar_dir.exists() {
        vec![grammar_dir.to_path_buf()]
    } else {
        Vec::new()
    }
}
