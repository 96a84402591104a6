//! Aggregate CPU utilization from two successive tick samples.

use crate::collector::CpuSample;

/// Compute u64 delta, returning `None` on counter regression.
fn du64(curr: u64, prev: u64) -> Option<u64> {
    (curr >= prev).then_some(curr - prev)
}

/// Total and idle ticks of one sample; all the tracker needs to retain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Totals {
    total: u64,
    idle: u64,
}

impl From<&CpuSample> for Totals {
    fn from(sample: &CpuSample) -> Self {
        Self {
            total: sample.total(),
            idle: sample.idle_total(),
        }
    }
}

/// Busy fraction of the ticks elapsed between two samples, in `[0, 1]`.
///
/// A zero or regressed total delta gives 0.0.
fn utilization(prev: Totals, curr: Totals) -> f64 {
    let Some(delta_total) = du64(curr.total, prev.total).filter(|&d| d > 0) else {
        return 0.0;
    };
    let delta_idle = du64(curr.idle, prev.idle).unwrap_or(0);
    let busy = delta_total.saturating_sub(delta_idle);
    (busy as f64 / delta_total as f64).clamp(0.0, 1.0)
}

/// Rolling two-sample window over the aggregate CPU counters.
///
/// Holds only the previous total and idle tick counts. Every call to
/// [`sample`](Self::sample) computes utilization against them and then
/// replaces them, so the first call after construction has nothing to
/// compare with and yields 0.0.
///
/// Single owner: `sample` takes `&mut self`, and the tracker must not be
/// shared between concurrent pollers without external locking.
#[derive(Debug, Default)]
pub struct CpuRateTracker {
    previous: Option<Totals>,
}

impl CpuRateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker whose previous sample is already `sample`.
    pub fn seeded(sample: &CpuSample) -> Self {
        Self {
            previous: Some(Totals::from(sample)),
        }
    }

    /// Feeds the latest sample and returns the busy fraction since the
    /// previous one. State advances exactly once per call, including when
    /// the result is the 0.0 fallback.
    pub fn sample(&mut self, sample: &CpuSample) -> f64 {
        let current = Totals::from(sample);
        let result = self
            .previous
            .map(|prev| utilization(prev, current))
            .unwrap_or(0.0);
        self.previous = Some(current);
        result
    }
}
