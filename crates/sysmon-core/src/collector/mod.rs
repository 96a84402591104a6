//! Counter acquisition for Linux.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   CounterSource                      │
//! │  /proc/stat  /proc/meminfo  /proc/uptime  /proc/[pid]│
//! │  /etc/os-release  /etc/passwd                        │
//! └──────────────────────────┬───────────────────────────┘
//!                            │
//!                     ┌──────▼──────┐
//!                     │  FileSystem │ (trait)
//!                     └──────┬──────┘
//!                ┌───────────┴───────────┐
//!         ┌──────▼──────┐         ┌──────▼──────┐
//!         │   RealFs    │         │   MockFs    │
//!         │  (Linux)    │         │ (Scenarios) │
//!         └─────────────┘         └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use sysmon_core::collector::{CounterPaths, CounterSource, MockFs};
//!
//! let source = CounterSource::new(MockFs::typical_system(), CounterPaths::default());
//! assert_eq!(source.read_uptime_secs(), 12345);
//! assert!(source.list_process_ids().contains(&1));
//! ```

pub mod mock;
pub mod paths;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use paths::CounterPaths;
pub use procfs::{CollectError, CounterSource, CpuSample, MemTotals, UserTable};
pub use traits::{FileSystem, RealFs};
