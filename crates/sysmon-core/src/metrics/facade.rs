//! One poll cycle: system-wide figures plus one snapshot per live process.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::collector::{CollectError, CounterPaths, CounterSource, FileSystem};
use crate::fmt::format_elapsed;
use crate::metrics::process::{CLK_TCK, ProcessSnapshot, by_cpu_desc};
use crate::metrics::rate::CpuRateTracker;

/// System-wide metrics of one poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    /// Busy fraction of all CPUs since the previous poll.
    pub cpu_utilization: f64,
    /// `(MemTotal - MemFree) / MemTotal`.
    pub memory_utilization: f64,
    pub mem_total_kb: u64,
    pub mem_free_kb: u64,
    pub uptime_secs: u64,
    /// Processes created since boot.
    pub total_processes: u64,
    pub running_processes: u64,
}

impl SystemMetrics {
    /// Uptime as `HH:MM:SS`.
    pub fn uptime(&self) -> String {
        format_elapsed(self.uptime_secs)
    }
}

/// Everything the display needs for one refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollResult {
    pub os_name: String,
    pub kernel_version: String,
    pub system: SystemMetrics,
    /// Sorted by descending CPU utilization.
    pub processes: Vec<ProcessSnapshot>,
}

/// Entry point polled by the refresh loop.
///
/// Owns the counter source and the single CPU rate tracker. Apart from that
/// tracker every poll is an independent set of reads.
pub struct MetricsFacade<F: FileSystem> {
    source: CounterSource<F>,
    tracker: CpuRateTracker,
    clock_ticks: u64,
    last_poll_duration: Option<Duration>,
}

impl<F: FileSystem> MetricsFacade<F> {
    pub fn new(source: CounterSource<F>, tracker: CpuRateTracker) -> Self {
        Self {
            source,
            tracker,
            clock_ticks: CLK_TCK,
            last_poll_duration: None,
        }
    }

    /// Facade over `fs` with a fresh tracker.
    pub fn from_fs(fs: F, paths: CounterPaths) -> Self {
        Self::new(CounterSource::new(fs, paths), CpuRateTracker::new())
    }

    /// Overrides the clock ticks per second used for process figures.
    pub fn with_clock_ticks(mut self, clock_ticks: u64) -> Self {
        self.clock_ticks = clock_ticks;
        self
    }

    #[cfg(test)]
    pub(crate) fn source_mut(&mut self) -> &mut CounterSource<F> {
        &mut self.source
    }

    /// Wall time spent in the previous `poll`.
    pub fn last_poll_duration(&self) -> Option<Duration> {
        self.last_poll_duration
    }

    /// Runs one poll cycle.
    ///
    /// Missing or malformed records degrade to zero values and processes that
    /// exit mid-poll are left out. Fails only when the process root cannot be
    /// listed.
    pub fn poll(&mut self) -> Result<PollResult, CollectError> {
        let start = Instant::now();

        let os_name = self.source.read_os_name();
        let kernel_version = self.source.read_kernel_version();

        let cpu_utilization = self.tracker.sample(&self.source.read_cpu_sample());

        let mem = self.source.read_memory_totals();
        let uptime_secs = self.source.read_uptime_secs();
        let system = SystemMetrics {
            cpu_utilization,
            memory_utilization: mem.utilization(),
            mem_total_kb: mem.total,
            mem_free_kb: mem.free,
            uptime_secs,
            total_processes: self.source.read_total_processes(),
            running_processes: self.source.read_running_processes(),
        };

        let pids = match self.source.try_list_process_ids() {
            Ok(pids) => pids,
            Err(e) => {
                warn!("{}", e);
                return Err(e);
            }
        };

        let users = self.source.read_user_table();
        if users.is_empty() {
            debug!("identity table is empty, owner names will be blank");
        }
        let mut processes: Vec<ProcessSnapshot> = pids
            .iter()
            .filter_map(|&pid| {
                ProcessSnapshot::collect(&self.source, pid, uptime_secs, self.clock_ticks, &users)
            })
            .collect();
        processes.sort_by(by_cpu_desc);

        let elapsed = start.elapsed();
        self.last_poll_duration = Some(elapsed);
        trace!(
            "poll: {} of {} pids, {} users, cpu {:.3}, took {:?}",
            processes.len(),
            pids.len(),
            users.len(),
            cpu_utilization,
            elapsed
        );

        Ok(PollResult {
            os_name,
            kernel_version,
            system,
            processes,
        })
    }
}
