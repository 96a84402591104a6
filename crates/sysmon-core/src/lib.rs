//! sysmon-core - counter acquisition and metric derivation for sysmon.
//!
//! Provides:
//! - `collector` - best-effort reads of `/proc` and identity files
//! - `metrics` - CPU rate tracking, process snapshots, the poll facade
//! - `fmt` - shared formatting helpers (`HH:MM:SS`, percentages)
//!
//! With `tui` feature (default):
//! - `tui` - terminal view that polls the facade on a fixed interval

pub mod collector;
pub mod fmt;
pub mod metrics;

#[cfg(feature = "tui")]
pub mod tui;
