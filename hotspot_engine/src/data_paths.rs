//! Locating the game's data directory.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Cached path to the directory holding `engine.toml`, the world definition and assets.
static DATA_ROOT: LazyLock<PathBuf> = LazyLock::new(detect_data_root);

pub fn data_root() -> &'static Path {
    &DATA_ROOT
}

/// Construct a data path relative to the resolved data root.
pub fn data_path(relative: impl AsRef<Path>) -> PathBuf {
    DATA_ROOT.join(relative)
}

/// Resolve the most likely location of the runtime data directory.
///
/// `HOTSPOT_DATA` wins if set; otherwise the workspace layout and a flattened
/// `data/` are tried relative to the working directory and the executable.
fn detect_data_root() -> PathBuf {
    if let Some(dir) = env::var_os("HOTSPOT_DATA") {
        return PathBuf::from(dir);
    }

    let mut candidates = vec![PathBuf::from("hotspot_engine/data"), PathBuf::from("data")];

    if let Ok(exe_path) = env::current_exe()
        && let Some(dir) = exe_path.parent()
    {
        candidates.push(dir.join("hotspot_engine/data"));
        candidates.push(dir.join("data"));

        if let Some(parent) = dir.parent() {
            candidates.push(parent.join("hotspot_engine/data"));
            candidates.push(parent.join("data"));
        }
    }

    first_existing_dir(candidates).unwrap_or_else(|| PathBuf::from("hotspot_engine/data"))
}

fn first_existing_dir(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|candidate| candidate.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_existing_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let found = first_existing_dir([missing, dir.path().to_path_buf()]);
        assert_eq!(found.as_deref(), Some(dir.path()));
        assert!(first_existing_dir([dir.path().join("nope")]).is_none());
    }
}
