//! Locations of the pseudo-files the counter source reads.

use std::path::{Path, PathBuf};

/// Where the counter source finds its records.
///
/// Defaults to the standard Linux locations. Only the process root is
/// normally overridden (containers, test fixtures).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterPaths {
    /// Process root holding `stat`, `meminfo`, `uptime`, `version` and one
    /// directory per pid.
    pub proc_root: PathBuf,
    /// os-release descriptor with the `PRETTY_NAME` key.
    pub os_release: PathBuf,
    /// Colon-delimited user identity table.
    pub passwd: PathBuf,
}

impl Default for CounterPaths {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            os_release: PathBuf::from("/etc/os-release"),
            passwd: PathBuf::from("/etc/passwd"),
        }
    }
}

impl CounterPaths {
    /// Default paths with a different process root.
    pub fn with_proc_root(proc_root: impl AsRef<Path>) -> Self {
        Self {
            proc_root: proc_root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// A file directly under the process root, e.g. `/proc/meminfo`.
    pub fn proc_file(&self, name: &str) -> PathBuf {
        self.proc_root.join(name)
    }

    /// A record of one process, e.g. `/proc/42/stat`.
    pub fn pid_file(&self, pid: u32, name: &str) -> PathBuf {
        self.proc_root.join(pid.to_string()).join(name)
    }
}
