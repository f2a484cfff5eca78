//! Where the CLI keeps its config file and run logs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Archived run logs kept next to `latest.log`.
pub const KEPT_RUN_LOGS: usize = 25;

const LATEST: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "run-";

fn dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "specsheet", "specsheet")
}

/// Per-user cache directory, e.g. `~/.cache/specsheet` on Linux.
pub fn cache_dir() -> Option<PathBuf> {
    dirs().map(|d| d.cache_dir().to_path_buf())
}

/// `config.json` inside the per-user config directory.
pub fn config_file() -> Option<PathBuf> {
    dirs().map(|d| d.config_dir().join("config.json"))
}

/// Make room in `dir` for a fresh run log and return its path.
///
/// The previous `latest.log` is archived as `run-<timestamp>.log`; only the
/// newest `keep` archives survive. Archive names sort chronologically.
pub fn rotate_logs(dir: &Path, keep: usize) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let latest = dir.join(LATEST);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        fs::rename(&latest, dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log")))?;
    }

    let mut archives = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log") {
            archives.push(name);
        }
    }
    archives.sort_unstable();
    let excess = archives.len().saturating_sub(keep);
    for name in &archives[..excess] {
        fs::remove_file(dir.join(name))?;
    }
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rotate_creates_missing_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs");
        let latest = rotate_logs(&dir, KEPT_RUN_LOGS).unwrap();
        assert_eq!(latest, dir.join("latest.log"));
        assert!(dir.is_dir());
        assert!(!latest.exists());
    }

    #[test]
    fn test_rotate_archives_latest_and_prunes_oldest() {
        let dir = tempfile::tempdir().unwrap();
        for stamp in ["20240101-000000.000", "20240102-000000.000", "20240103-000000.000"] {
            fs::write(dir.path().join(format!("run-{stamp}.log")), "old").unwrap();
        }
        fs::write(dir.path().join("latest.log"), "previous run").unwrap();
        fs::write(dir.path().join("notes.txt"), "untouched").unwrap();

        rotate_logs(dir.path(), 2).unwrap();

        let left = names(dir.path());
        assert_eq!(left.len(), 3);
        assert_eq!(left[0], "notes.txt");
        assert_eq!(left[1], "run-20240103-000000.000.log");
        assert!(left[2].starts_with("run-") && left[2] != left[1]);
        assert_eq!(fs::read_to_string(dir.path().join(&left[2])).unwrap(), "previous run");
    }

    #[test]
    fn test_rotate_reports_unusable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        fs::write(&file, "").unwrap();
        assert!(rotate_logs(&file, KEPT_RUN_LOGS).is_err());
    }
}
