//! Parsers for `/proc` records and the system identity files.
//!
//! Pure functions over file contents. None of them fail: a missing key or an
//! unparsable magnitude yields the field's zero value, so a single odd record
//! never blanks the whole display.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate CPU tick counters from the `cpu` line of `/proc/stat`.
///
/// All fields are monotonically non-decreasing over the life of the system;
/// one sample carries no utilization meaning on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuSample {
    /// Sum of all eight counters, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        [
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .iter()
        .fold(self.user, |acc, &v| acc.saturating_add(v))
    }

    /// Ticks spent doing nothing: idle plus waiting on I/O.
    pub fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }
}

/// `MemTotal` and `MemFree` from `/proc/meminfo`, in kB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemTotals {
    pub total: u64,
    pub free: u64,
}

impl MemTotals {
    /// Fraction of memory in use, 0.0 when the total is unknown.
    pub fn utilization(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.total.saturating_sub(self.free) as f64 / self.total as f64
    }
}

/// Tick counters from `/proc/[pid]/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PidTicks {
    /// utime + stime + cutime + cstime.
    pub active: u64,
    /// Start time in ticks since boot.
    pub start: u64,
}

/// Extracts `PRETTY_NAME` from an os-release file, without quotes.
pub fn parse_os_pretty_name(content: &str) -> String {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == "PRETTY_NAME")
        .map(|(_, value)| {
            value
                .trim()
                .trim_matches(|c: char| c == '"' || c == '\'')
                .to_string()
        })
        .unwrap_or_default()
}

/// Third whitespace-separated token of `/proc/version`.
///
/// `Linux version 6.1.0-13-amd64 (...)` gives `6.1.0-13-amd64`.
pub fn parse_kernel_version(content: &str) -> String {
    content
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(2))
        .unwrap_or_default()
        .to_string()
}

/// Parses `MemTotal` and `MemFree` from `/proc/meminfo`.
pub fn parse_meminfo(content: &str) -> MemTotals {
    let mut totals = MemTotals::default();

    let parse_kb = |value: &str| -> u64 {
        value
            .split_whitespace()
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if let Some((key, value)) = line.split_once(':') {
            match key.trim() {
                "MemTotal" => totals.total = parse_kb(value),
                "MemFree" => totals.free = parse_kb(value),
                _ => {}
            }
        }
    }

    totals
}

/// Whole seconds since boot from `/proc/uptime` (`"350735.47 234388.90"`).
pub fn parse_uptime(content: &str) -> u64 {
    content
        .split_whitespace()
        .next()
        .and_then(|field| field.split('.').next())
        .and_then(|secs| secs.parse().ok())
        .unwrap_or(0)
}

/// Parses the aggregate `cpu` line of `/proc/stat`.
///
/// Per-core `cpuN` lines are skipped. Missing trailing fields and unparsable
/// values are 0; `guest` and `guest_nice` are ignored since the kernel
/// already folds them into `user` and `nice`.
pub fn parse_cpu_sample(content: &str) -> CpuSample {
    let Some(fields) = content.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        (parts.next() == Some("cpu")).then_some(parts)
    }) else {
        return CpuSample::default();
    };

    let mut values = [0u64; 8];
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = field.parse().unwrap_or(0);
    }

    let [user, nice, system, idle, iowait, irq, softirq, steal] = values;
    CpuSample {
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
        steal,
    }
}

/// Value of a `key value` line in `/proc/stat`, e.g. `processes` or
/// `procs_running`.
pub fn parse_stat_counter(content: &str, key: &str) -> u64 {
    content
        .lines()
        .find_map(|line| {
            let mut parts = line.split_whitespace();
            (parts.next() == Some(key)).then(|| parts.next())
        })
        .flatten()
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Returns the 1-indexed positional field of a `/proc/[pid]/stat` record.
///
/// The command name (field 2) is wrapped in parentheses and may itself hold
/// spaces or parentheses, so positions from field 3 onwards are counted after
/// the last `)`. Records without a parenthesised name fall back to plain
/// whitespace positions.
fn pid_stat_field(content: &str, position: usize) -> Option<&str> {
    let content = content.trim();
    match content.rfind(')') {
        Some(close) if position >= 3 => content[close + 1..]
            .split_whitespace()
            .nth(position - 3),
        _ => content.split_whitespace().nth(position.checked_sub(1)?),
    }
}

/// Parses the tick counters of a `/proc/[pid]/stat` record.
///
/// Fields 14..=17 (utime, stime, cutime, cstime) make up the active ticks;
/// if any of them is missing or unparsable, or the sum overflows, the active
/// count is 0. The child counters are signed in the kernel, so the sum is
/// floored at 0. Field 22 is the start time.
pub fn parse_pid_ticks(content: &str) -> PidTicks {
    let active = (14..=17)
        .try_fold(0i64, |acc, position| {
            let value = pid_stat_field(content, position)?.parse::<i64>().ok()?;
            acc.checked_add(value)
        })
        .map(|sum| sum.max(0) as u64)
        .unwrap_or(0);

    let start = pid_stat_field(content, 22)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    PidTicks { active, start }
}

/// Finds the value part of a `Key:\tvalue` line in `/proc/[pid]/status`.
fn status_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        (k.trim() == key).then(|| v.trim())
    })
}

/// `VmSize` of `/proc/[pid]/status` converted from kB to whole MB.
///
/// Returns `""` when the line is absent (kernel threads have none) and a
/// single blank when the magnitude does not parse.
pub fn parse_status_vm_size_mb(content: &str) -> String {
    match status_value(content, "VmSize") {
        None => String::new(),
        Some(value) => value
            .split_whitespace()
            .next()
            .and_then(|kb| kb.parse::<u64>().ok())
            .map(|kb| (kb / 1024).to_string())
            .unwrap_or_else(|| " ".to_string()),
    }
}

/// First (real) uid of the `Uid:` line in `/proc/[pid]/status`.
pub fn parse_status_uid(content: &str) -> String {
    status_value(content, "Uid")
        .and_then(|value| value.split_whitespace().next())
        .unwrap_or_default()
        .to_string()
}

/// Parses `/etc/passwd` into a map of uid to user name.
///
/// Format: `name:password:uid:gid:gecos:home:shell`. Comments, blank lines
/// and rows with a non-numeric uid are skipped. The first row wins when a
/// uid appears twice, as with `getpwuid`.
pub fn parse_passwd(content: &str) -> HashMap<u32, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() >= 3
            && let Ok(uid) = parts[2].parse::<u32>()
        {
            map.entry(uid).or_insert_with(|| parts[0].to_string());
        }
    }
    map
}

/// Uid to user name lookup backed by one read of the identity table.
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    uid_to_name: HashMap<u32, String>,
}

impl UserTable {
    pub fn from_passwd(content: &str) -> Self {
        Self {
            uid_to_name: parse_passwd(content),
        }
    }

    /// Resolves a uid as read from a status record; unknown or malformed
    /// uids resolve to an empty name.
    pub fn resolve(&self, uid: &str) -> String {
        uid.trim()
            .parse::<u32>()
            .ok()
            .and_then(|uid| self.uid_to_name.get(&uid))
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.uid_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uid_to_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT_BASH: &str = "1234 (bash) S 1233 1234 1234 34816 1235 4194304 5000 50000 10 20 100 50 200 100 20 0 1 0 100000 25000000 2000 18446744073709551615 0 0 0 0 0 0 65536 3670020 1266777851 0 0 0 17 2 0 0 5 0 0 0 0 0 0 0 0 0 0";

    #[test]
    fn test_parse_os_pretty_name() {
        let content = "NAME=\"Debian GNU/Linux\"\nPRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\nID=debian\n";
        assert_eq!(parse_os_pretty_name(content), "Debian GNU/Linux 12 (bookworm)");
    }

    #[test]
    fn test_parse_os_pretty_name_unquoted() {
        assert_eq!(parse_os_pretty_name("PRETTY_NAME=Alpine\n"), "Alpine");
    }

    #[test]
    fn test_parse_os_pretty_name_missing() {
        assert_eq!(parse_os_pretty_name("NAME=\"Arch Linux\"\nID=arch\n"), "");
        assert_eq!(parse_os_pretty_name(""), "");
    }

    #[test]
    fn test_parse_kernel_version() {
        let content = "Linux version 6.1.0-13-amd64 (debian-kernel@lists.debian.org) (gcc-12 (Debian 12.2.0-14) 12.2.0) #1 SMP PREEMPT_DYNAMIC\n";
        assert_eq!(parse_kernel_version(content), "6.1.0-13-amd64");
    }

    #[test]
    fn test_parse_kernel_version_short() {
        assert_eq!(parse_kernel_version("Linux version"), "");
        assert_eq!(parse_kernel_version(""), "");
    }

    #[test]
    fn test_parse_meminfo() {
        let totals = parse_meminfo("MemTotal:    1000 kB\nMemFree:      250 kB\nMemAvailable: 500 kB\n");
        assert_eq!(totals, MemTotals { total: 1000, free: 250 });
        assert!((totals.utilization() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_parse_meminfo_unparsable_is_zero() {
        let totals = parse_meminfo("MemTotal: lots kB\nMemFree: 10 kB\n");
        assert_eq!(totals.total, 0);
        assert_eq!(totals.free, 10);
        assert_eq!(totals.utilization(), 0.0);
    }

    #[test]
    fn test_parse_uptime() {
        assert_eq!(parse_uptime("350735.47 234388.90\n"), 350735);
        assert_eq!(parse_uptime("42\n"), 42);
        assert_eq!(parse_uptime(""), 0);
        assert_eq!(parse_uptime("garbage 1.0"), 0);
    }

    #[test]
    fn test_parse_cpu_sample_skips_per_core_lines() {
        let content = "cpu0 1 1 1 1 1 1 1 1\ncpu  10 20 30 40 50 60 70 80 90 100\ncpu1 2 2 2 2 2 2 2 2\n";
        let sample = parse_cpu_sample(content);
        assert_eq!(sample.user, 10);
        assert_eq!(sample.steal, 80);
        assert_eq!(sample.total(), 360);
        assert_eq!(sample.idle_total(), 90);
    }

    #[test]
    fn test_parse_cpu_sample_short_line() {
        let sample = parse_cpu_sample("cpu 5 6 7 8\n");
        assert_eq!(sample.idle, 8);
        assert_eq!(sample.iowait, 0);
        assert_eq!(sample.steal, 0);
        assert_eq!(sample.total(), 26);
    }

    #[test]
    fn test_parse_cpu_sample_missing() {
        assert_eq!(parse_cpu_sample("ctxt 1\n"), CpuSample::default());
    }

    #[test]
    fn test_parse_cpu_sample_is_idempotent() {
        let content = "cpu  10000 500 3000 80000 1000 200 100 0 0 0\n";
        assert_eq!(parse_cpu_sample(content), parse_cpu_sample(content));
    }

    #[test]
    fn test_parse_stat_counter() {
        let content = "cpu 1 2 3\nprocesses 10000\nprocs_running 3\nprocs_blocked 1\n";
        assert_eq!(parse_stat_counter(content, "processes"), 10000);
        assert_eq!(parse_stat_counter(content, "procs_running"), 3);
        assert_eq!(parse_stat_counter(content, "procs_zombie"), 0);
        assert_eq!(parse_stat_counter("processes many\n", "processes"), 0);
    }

    #[test]
    fn test_parse_pid_ticks() {
        let ticks = parse_pid_ticks(STAT_BASH);
        assert_eq!(ticks.active, 100 + 50 + 200 + 100);
        assert_eq!(ticks.start, 100000);
    }

    #[test]
    fn test_parse_pid_ticks_name_with_spaces_and_parens() {
        let content = "5001 (my (odd) proc) S 1 5001 5001 0 -1 4194304 1000 0 0 0 10 5 1 2 20 0 1 0 500100 10000000 1000 18446744073709551615 0 0";
        let ticks = parse_pid_ticks(content);
        assert_eq!(ticks.active, 18);
        assert_eq!(ticks.start, 500100);
    }

    #[test]
    fn test_parse_pid_ticks_without_parens() {
        let content = "7 init S 0 1 1 0 -1 0 0 0 0 0 3 4 5 6 20 0 1 0 99";
        let ticks = parse_pid_ticks(content);
        assert_eq!(ticks.active, 18);
        assert_eq!(ticks.start, 99);
    }

    #[test]
    fn test_parse_pid_ticks_too_short() {
        assert_eq!(parse_pid_ticks("1 (init) S 0 1"), PidTicks::default());
        assert_eq!(parse_pid_ticks(""), PidTicks::default());
    }

    #[test]
    fn test_parse_pid_ticks_negative_children() {
        let content = "9 (x) S 1 9 9 0 -1 0 0 0 0 0 10 10 -30 0 20 0 1 0 5";
        assert_eq!(parse_pid_ticks(content).active, 0);
    }

    #[test]
    fn test_parse_pid_ticks_overflowing_sum() {
        let content = format!(
            "9 (x) S 1 9 9 0 -1 0 0 0 0 0 {} 1 0 0 20 0 1 0 5",
            i64::MAX
        );
        let ticks = parse_pid_ticks(&content);
        assert_eq!(ticks.active, 0);
        assert_eq!(ticks.start, 5);
    }

    #[test]
    fn test_cpu_sample_totals_saturate() {
        let sample = parse_cpu_sample("cpu  18446744073709551615 1 0 5 7 0 0 0\n");
        assert_eq!(sample.user, u64::MAX);
        assert_eq!(sample.total(), u64::MAX);
        assert_eq!(sample.idle_total(), 12);
    }

    #[test]
    fn test_parse_status_vm_size_mb() {
        assert_eq!(parse_status_vm_size_mb("Name:\tbash\nVmSize:\t   25000 kB\n"), "24");
        assert_eq!(parse_status_vm_size_mb("VmSize:\t1023 kB\n"), "0");
        assert_eq!(parse_status_vm_size_mb("VmSize:\tabc kB\n"), " ");
        assert_eq!(parse_status_vm_size_mb("Name:\tkthreadd\n"), "");
    }

    #[test]
    fn test_parse_status_vm_peak_not_confused_with_size() {
        let content = "VmPeak:\t 99999 kB\nVmSize:\t 2048 kB\n";
        assert_eq!(parse_status_vm_size_mb(content), "2");
    }

    #[test]
    fn test_parse_status_uid() {
        let content = "Name:\tbash\nUid:\t1000\t1001\t1002\t1003\nGid:\t100\t100\t100\t100\n";
        assert_eq!(parse_status_uid(content), "1000");
        assert_eq!(parse_status_uid("Name:\tbash\n"), "");
    }

    #[test]
    fn test_parse_passwd() {
        let content = "# comment\nroot:x:0:0::/root:/bin/bash\n\nuser:x:1000:1000::/home/user:/bin/bash\nbroken:x:abc\nshort\n";
        let map = parse_passwd(content);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&0).map(String::as_str), Some("root"));
        assert_eq!(map.get(&1000).map(String::as_str), Some("user"));
    }

    #[test]
    fn test_user_table_resolve() {
        let users = UserTable::from_passwd(
            "root:x:0:0::/root:/bin/bash\nuser:x:1000:1000::/home/user:/bin/bash\ntoor:x:0:0::/root:/bin/sh\n",
        );
        assert_eq!(users.len(), 2);
        assert_eq!(users.resolve("0"), "root");
        assert_eq!(users.resolve("1000"), "user");
        assert_eq!(users.resolve("9999"), "");
        assert_eq!(users.resolve(""), "");
        assert!(UserTable::default().is_empty());
    }
}
