//! Readers for the Linux `/proc` filesystem and the identity files that
//! accompany it.

pub mod parser;
pub mod source;

pub use parser::{CpuSample, MemTotals, PidTicks, UserTable};
pub use source::{CollectError, CounterSource};
