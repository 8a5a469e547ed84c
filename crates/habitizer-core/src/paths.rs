use crate::error::{HabitError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const HABITIZER_DIR: &str = ".habitizer";

pub const CONFIG_FILE: &str = ".habitizer/config.yaml";
pub const PLAYER_FILE: &str = ".habitizer/player.yaml";
pub const HABITS_FILE: &str = ".habitizer/habits.yaml";
/// Flat JSON object: reward habit name to the last day it was completed.
pub const LEDGER_FILE: &str = ".habitizer/completed_habits.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn habitizer_dir(root: &Path) -> PathBuf {
    root.join(HABITIZER_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn player_path(root: &Path) -> PathBuf {
    root.join(PLAYER_FILE)
}

pub fn habits_path(root: &Path) -> PathBuf {
    root.join(HABITS_FILE)
}

pub fn ledger_path(root: &Path) -> PathBuf {
    root.join(LEDGER_FILE)
}

pub fn is_initialized(root: &Path) -> bool {
    player_path(root).exists()
}

/// Resolve the state root.
///
/// Priority:
/// 1. `explicit` (the `--root` flag or `HABITIZER_ROOT`)
/// 2. Walk upward from `cwd` looking for `.habitizer/`
/// 3. The user's home directory
pub fn resolve_root(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }

    let mut dir = cwd.to_path_buf();
    loop {
        if dir.join(HABITIZER_DIR).is_dir() {
            return Ok(dir);
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    home::home_dir().ok_or(HabitError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()), other.path()).unwrap();
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_habitizer_dir_upward() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(HABITIZER_DIR)).unwrap();
        let subdir = dir.path().join("notes/2024");
        std::fs::create_dir_all(&subdir).unwrap();

        let result = resolve_root(None, &subdir).unwrap();
        assert_eq!(result, dir.path());
    }

    #[test]
    fn state_files_live_under_habitizer_dir() {
        let root = Path::new("/tmp/r");
        assert!(player_path(root).starts_with(habitizer_dir(root)));
        assert!(ledger_path(root).ends_with("completed_habits.json"));
    }
}
