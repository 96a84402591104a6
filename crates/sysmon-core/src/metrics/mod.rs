//! Metrics derived from raw counters.
//!
//! - `rate` - aggregate CPU utilization from successive samples
//! - `process` - per-process snapshot, display row and ordering
//! - `facade` - one poll cycle over all of the above

pub mod facade;
pub mod process;
pub mod rate;

pub use facade::{MetricsFacade, PollResult, SystemMetrics};
pub use process::{CLK_TCK, ProcessRow, ProcessSnapshot, by_cpu_desc, process_usage};
pub use rate::CpuRateTracker;
