//! Per-process metrics built afresh on every poll.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collector::procfs::PidTicks;
use crate::collector::procfs::parser::{parse_status_uid, parse_status_vm_size_mb};
use crate::collector::{CounterSource, FileSystem, UserTable};
use crate::fmt::{format_elapsed, format_percent};

/// Clock ticks per second (USER_HZ). Standard value for Linux.
pub const CLK_TCK: u64 = 100;

/// CPU fraction and age derived from a process's own lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessUsage {
    pub cpu_utilization: f64,
    pub age_secs: u64,
}

/// Derives utilization and age from tick counters.
///
/// `age = uptime - start / clock_ticks`, floored at 0; utilization is active
/// CPU seconds over that age and is 0.0 whenever the age is not positive.
/// A busy multi-threaded process can exceed 1.0.
pub fn process_usage(ticks: PidTicks, uptime_secs: u64, clock_ticks: u64) -> ProcessUsage {
    if clock_ticks == 0 {
        return ProcessUsage {
            cpu_utilization: 0.0,
            age_secs: uptime_secs,
        };
    }

    let started_at = (ticks.start / clock_ticks) as i64;
    let age = uptime_secs as i64 - started_at;
    if age <= 0 {
        return ProcessUsage {
            cpu_utilization: 0.0,
            age_secs: 0,
        };
    }

    let active_secs = ticks.active as f64 / clock_ticks as f64;
    ProcessUsage {
        cpu_utilization: active_secs / age as f64,
        age_secs: age as u64,
    }
}

/// Fully resolved metrics of one process at one poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub pid: u32,
    /// Owner name; empty when the uid has no identity table row.
    pub user: String,
    pub uid: String,
    /// Raw first line of the cmdline record, NUL separators included.
    pub command: String,
    /// Virtual size in MB as read; may be `""` or `" "`.
    pub ram_mb: String,
    pub active_ticks: u64,
    pub start_ticks: u64,
    pub cpu_utilization: f64,
    pub age_secs: u64,
}

/// One display row of the process table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRow {
    pub pid: u32,
    pub user: String,
    /// Percent with one decimal, e.g. `"12.5"`.
    pub cpu: String,
    pub ram: String,
    /// Age as `HH:MM:SS`.
    pub time: String,
    pub command: String,
}

impl ProcessSnapshot {
    /// Reads and derives everything about `pid`.
    ///
    /// Returns `None` when the process's stat or status record is gone, i.e.
    /// it exited after enumeration. A missing cmdline only blanks the
    /// command.
    pub fn collect<F: FileSystem>(
        source: &CounterSource<F>,
        pid: u32,
        uptime_secs: u64,
        clock_ticks: u64,
        users: &UserTable,
    ) -> Option<Self> {
        let Some(ticks) = source.read_process_ticks(pid) else {
            debug!("process {} vanished before it could be read", pid);
            return None;
        };
        let Some(status) = source.read_process_status(pid) else {
            debug!("process {} exited while being read", pid);
            return None;
        };

        let uid = parse_status_uid(&status);
        let user = users.resolve(&uid);
        let usage = process_usage(ticks, uptime_secs, clock_ticks);

        Some(Self {
            pid,
            user,
            uid,
            command: source.read_process_command(pid),
            ram_mb: parse_status_vm_size_mb(&status),
            active_ticks: ticks.active,
            start_ticks: ticks.start,
            cpu_utilization: usage.cpu_utilization,
            age_secs: usage.age_secs,
        })
    }

    /// The row shown by the process table.
    pub fn row(&self) -> ProcessRow {
        ProcessRow {
            pid: self.pid,
            user: self.user.clone(),
            cpu: format_percent(self.cpu_utilization),
            ram: self.ram_mb.clone(),
            time: format_elapsed(self.age_secs),
            command: self.command.clone(),
        }
    }
}

/// Orders snapshots by descending CPU utilization.
///
/// Compares the utilization fraction only; pids with equal utilization are
/// left in arbitrary relative order.
pub fn by_cpu_desc(a: &ProcessSnapshot, b: &ProcessSnapshot) -> Ordering {
    b.cpu_utilization.total_cmp(&a.cpu_utilization)
}
