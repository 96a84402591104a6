//! Typed, best-effort reads of system and per-process counters.

use crate::collector::paths::CounterPaths;
use crate::collector::procfs::parser::{
    CpuSample, MemTotals, PidTicks, UserTable, parse_cpu_sample, parse_kernel_version,
    parse_meminfo, parse_os_pretty_name, parse_pid_ticks, parse_stat_counter,
    parse_status_uid, parse_status_vm_size_mb, parse_uptime,
};
use crate::collector::traits::FileSystem;
use std::path::Path;
use tracing::trace;

/// Failure to read the counter source at all.
///
/// Individual records never produce this; only losing the process root,
/// which leaves nothing to display.
#[derive(Debug)]
pub enum CollectError {
    /// The process root could not be listed.
    ProcRootUnreadable(std::io::Error),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::ProcRootUnreadable(e) => write!(f, "process root unreadable: {}", e),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::ProcRootUnreadable(e) => Some(e),
        }
    }
}

/// Reads raw kernel counters and identity data.
///
/// Stateless: every method is an independent query that may be called any
/// number of times in any order. A missing or unreadable record is treated
/// as empty, so every method returns its zero value instead of failing.
pub struct CounterSource<F: FileSystem> {
    fs: F,
    paths: CounterPaths,
}

impl<F: FileSystem> CounterSource<F> {
    pub fn new(fs: F, paths: CounterPaths) -> Self {
        Self { fs, paths }
    }

    /// Mutable access to the backing filesystem, for feeding a mock tree
    /// new counter values between polls.
    #[cfg(test)]
    pub(crate) fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    fn read(&self, path: &Path) -> String {
        self.try_read(path).unwrap_or_default()
    }

    fn try_read(&self, path: &Path) -> Option<String> {
        match self.fs.read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                trace!("cannot read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Distribution display name (`PRETTY_NAME`), or `""`.
    pub fn read_os_name(&self) -> String {
        parse_os_pretty_name(&self.read(&self.paths.os_release))
    }

    /// Kernel release from the version record, or `""`.
    pub fn read_kernel_version(&self) -> String {
        parse_kernel_version(&self.read(&self.paths.proc_file("version")))
    }

    /// Numeric entries directly under the process root, ascending.
    ///
    /// Fails only when the root itself cannot be listed.
    pub fn try_list_process_ids(&self) -> Result<Vec<u32>, CollectError> {
        let entries = self
            .fs
            .read_dir(&self.paths.proc_root)
            .map_err(CollectError::ProcRootUnreadable)?;

        let mut pids: Vec<u32> = entries
            .iter()
            .filter_map(|entry| entry.file_name().and_then(|n| n.to_str()))
            .filter(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|name| name.parse().ok())
            .collect();
        pids.sort_unstable();
        pids.dedup();
        Ok(pids)
    }

    /// Numeric entries directly under the process root; empty when the root
    /// cannot be listed. Callers must not rely on the order.
    pub fn list_process_ids(&self) -> Vec<u32> {
        self.try_list_process_ids().unwrap_or_default()
    }

    /// `MemTotal` and `MemFree` in kB.
    pub fn read_memory_totals(&self) -> MemTotals {
        parse_meminfo(&self.read(&self.paths.proc_file("meminfo")))
    }

    /// Whole seconds since boot.
    pub fn read_uptime_secs(&self) -> u64 {
        parse_uptime(&self.read(&self.paths.proc_file("uptime")))
    }

    /// Aggregate CPU tick counters.
    pub fn read_cpu_sample(&self) -> CpuSample {
        parse_cpu_sample(&self.read(&self.paths.proc_file("stat")))
    }

    /// Processes created since boot (`processes` in `/proc/stat`).
    pub fn read_total_processes(&self) -> u64 {
        parse_stat_counter(&self.read(&self.paths.proc_file("stat")), "processes")
    }

    /// Processes currently runnable (`procs_running` in `/proc/stat`).
    pub fn read_running_processes(&self) -> u64 {
        parse_stat_counter(&self.read(&self.paths.proc_file("stat")), "procs_running")
    }

    /// First line of the process's command-line record, verbatim.
    ///
    /// NUL separators are kept as-is; kernel threads and exited processes
    /// give `""`.
    pub fn read_process_command(&self, pid: u32) -> String {
        self.read(&self.paths.pid_file(pid, "cmdline"))
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Virtual memory size in whole MB as a decimal string.
    ///
    /// `""` when the status record or its `VmSize` line is missing, `" "`
    /// when the magnitude does not parse.
    pub fn read_process_memory_mb(&self, pid: u32) -> String {
        parse_status_vm_size_mb(&self.read(&self.paths.pid_file(pid, "status")))
    }

    /// Raw status record of the process; `None` once the process has exited.
    ///
    /// Every live process has one, kernel threads included.
    pub fn read_process_status(&self, pid: u32) -> Option<String> {
        self.try_read(&self.paths.pid_file(pid, "status"))
    }

    /// Real uid of the process as written in its status record.
    pub fn read_process_owner_id(&self, pid: u32) -> String {
        parse_status_uid(&self.read(&self.paths.pid_file(pid, "status")))
    }

    /// Looks a uid up in the identity table; `""` if there is no such row.
    pub fn read_process_owner_name(&self, uid: &str) -> String {
        self.read_user_table().resolve(uid)
    }

    /// The whole identity table, for resolving many uids off one read.
    pub fn read_user_table(&self) -> UserTable {
        UserTable::from_passwd(&self.read(&self.paths.passwd))
    }

    /// utime + stime + cutime + cstime of the process, 0 when unavailable.
    pub fn read_process_active_ticks(&self, pid: u32) -> u64 {
        self.read_process_ticks(pid)
            .map(|ticks| ticks.active)
            .unwrap_or(0)
    }

    /// Start time of the process in ticks since boot, 0 when unavailable.
    pub fn read_process_start_ticks(&self, pid: u32) -> u64 {
        self.read_process_ticks(pid)
            .map(|ticks| ticks.start)
            .unwrap_or(0)
    }

    /// Tick counters of the process; `None` when its stat record is gone,
    /// which means the process exited after enumeration.
    pub fn read_process_ticks(&self, pid: u32) -> Option<PidTicks> {
        self.try_read(&self.paths.pid_file(pid, "stat"))
            .map(|content| parse_pid_ticks(&content))
    }
}
