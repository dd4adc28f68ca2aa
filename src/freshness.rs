//! Mtime-based freshness detection for copied and derived files.
//!
//! Pages re-render every build; assets and image variants skip work
//! when the existing output is at least as new as its source.

use std::path::Path;
use std::time::SystemTime;

/// Check if output file is newer than the given source mtime
///
/// Returns `true` if the output exists and is newer than source_mtime,
/// meaning the output is fresh and processing can be skipped
pub fn is_output_fresh(output: &Path, source_mtime: Option<SystemTime>) -> bool {
    let Some(source_time) = source_mtime else {
        return false;
    };

    output
        .metadata()
        .and_then(|m| m.modified())
        .map(|output_time| output_time >= source_time)
        .unwrap_or(false)
}

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Check if file A is newer than file B
///
/// Returns `true` if A exists and is newer than B
/// Returns `false` if either file doesn't exist or times can't be compared
pub fn is_newer_than(a: &Path, b: &Path) -> bool {
    let (Some(a_time), Some(b_time)) = (get_mtime(a), get_mtime(b)) else {
        return false;
    };
    a_time > b_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_get_mtime_missing_file() {
        assert!(get_mtime(Path::new("/nonexistent/file")).is_none());
    }

    #[test]
    fn test_is_newer_than() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old.txt");
        let new = dir.path().join("new.txt");

        fs::write(&old, "old").unwrap();
        // Filesystem mtime granularity can be coarse
        std::thread::sleep(std::time::Duration::from_millis(10));
        fs::write(&new, "new").unwrap();

        assert!(is_newer_than(&new, &old));
        assert!(!is_newer_than(&old, &new));
        assert!(!is_newer_than(&old, Path::new("/nonexistent")));
    }

    #[test]
    fn test_is_output_fresh() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        fs::write(&source, "source").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));

        let output = dir.path().join("output.txt");
        fs::write(&output, "output").unwrap();

        assert!(is_output_fresh(&output, get_mtime(&source)));
        assert!(!is_output_fresh(&output, None));
        assert!(!is_output_fresh(Path::new("/nonexistent"), get_mtime(&source)));
    }
}
