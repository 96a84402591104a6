//! Filesystem access behind a trait so the counter source can be driven by
//! the real `/proc` tree on Linux or by an in-memory tree in tests.

use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of the pseudo-files the counter source consumes.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Lists the direct children of a directory.
    ///
    /// Returns full paths; the order is whatever the backing store yields.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        // cmdline records may carry non-UTF-8 bytes
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_real_fs_read_to_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uptime");
        fs::write(&path, "350735.47 234388.90\n").unwrap();

        let content = RealFs::new().read_to_string(&path).unwrap();
        assert_eq!(content, "350735.47 234388.90\n");
    }

    #[test]
    fn test_real_fs_read_lossy_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmdline");
        fs::write(&path, b"/usr/bin/app\0--flag\0\xff").unwrap();

        let content = RealFs::new().read_to_string(&path).unwrap();
        assert!(content.starts_with("/usr/bin/app\0--flag\0"));
    }

    #[test]
    fn test_real_fs_read_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("1")).unwrap();
        fs::create_dir(dir.path().join("self")).unwrap();
        fs::write(dir.path().join("stat"), "cpu 1 2 3 4\n").unwrap();

        let mut entries = RealFs::new().read_dir(dir.path()).unwrap();
        entries.sort();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], dir.path().join("1"));
    }

    #[test]
    fn test_real_fs_read_dir_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RealFs::new().read_dir(&dir.path().join("nope")).is_err());
    }
}
