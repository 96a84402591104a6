//! Mock filesystem and pre-built `/proc` scenarios.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
