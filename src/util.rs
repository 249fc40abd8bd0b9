use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;
use tracing::warn;

/// Files matching `pattern`, sorted lexicographically so batch passes walk
/// them in a deterministic order. Matches that cannot be read are logged
/// and dropped rather than failing the enumeration.
pub fn sorted_matches(pattern: &str) -> Result<Vec<PathBuf>> {
    let matches = glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))?;
    let mut files = Vec::new();
    for entry in matches {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(err) => warn!("skipping unreadable match: {err}"),
        }
    }
    files.sort();
    Ok(files)
}
