//! Cycle planning sources.
//!
//! A cycle source decides, per cycle, how long the simulated work takes
//! and whether the cycle is flagged as an error. The trait seam allows
//! swapping the seeded random source for a scripted one in tests.

use super::WorkloadConfig;
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};
use std::time::Duration;

/// Plan for a single work cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePlan {
    /// Simulated work duration.
    pub work: Duration,
    /// Whether this cycle is flagged as a simulated error.
    pub simulate_error: bool,
}

/// Trait for cycle plan sources.
///
/// This abstraction allows swapping between the seeded random source
/// and scripted sequences for testing.
pub trait CycleSource {
    /// Produces the plan for the next cycle.
    fn next_plan(&mut self) -> CyclePlan;
}

/// Seeded random cycle source.
///
/// Work durations are uniform over `[min_work_ms, max_work_ms)`. The
/// error draw is the integer form `draw % error_window == 0`, a 1-in-N
/// draw rather than a continuous probability, kept exact so seeded runs
/// reproduce the same error positions.
pub struct RandomCycleSource<R: RngCore> {
    rng: R,
    min_work_ms: u64,
    work_span_ms: u64,
    error_window: u64,
}

impl RandomCycleSource<ChaCha20Rng> {
    /// Creates a source seeded from the OS entropy source.
    pub fn from_os_entropy(config: &WorkloadConfig) -> Self {
        let mut seed = [0u8; 32];
        rand_core::OsRng.fill_bytes(&mut seed);
        Self::with_rng(ChaCha20Rng::from_seed(seed), config)
    }

    /// Creates a deterministic source from a fixed seed.
    pub fn from_seed_value(seed: u64, config: &WorkloadConfig) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed), config)
    }
}

impl<R: RngCore> RandomCycleSource<R> {
    /// Creates a source backed by the given generator.
    ///
    /// Expects a validated config; degenerate ranges are clamped to
    /// keep the draws well-defined.
    pub fn with_rng(rng: R, config: &WorkloadConfig) -> Self {
        Self {
            rng,
            min_work_ms: config.min_work_ms,
            work_span_ms: config.max_work_ms.saturating_sub(config.min_work_ms).max(1),
            error_window: config.error_window.max(1),
        }
    }
}

impl<R: RngCore> CycleSource for RandomCycleSource<R> {
    fn next_plan(&mut self) -> CyclePlan {
        let work_ms = self.min_work_ms + self.rng.next_u64() % self.work_span_ms;
        let simulate_error = self.rng.next_u64() % self.error_window == 0;

        CyclePlan {
            work: Duration::from_millis(work_ms),
            simulate_error,
        }
    }
}

/// Scripted cycle source for testing.
///
/// Replays a fixed, non-empty plan sequence, wrapping around when
/// exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedCycleSource {
    plans: Vec<CyclePlan>,
    position: usize,
}

impl ScriptedCycleSource {
    /// Creates a source replaying the given plans.
    pub fn new(plans: Vec<CyclePlan>) -> Self {
        Self { plans, position: 0 }
    }

    /// Creates `count` instant cycles with errors at the given
    /// 1-indexed cycle numbers.
    pub fn with_error_cycles(count: usize, error_cycles: &[usize]) -> Self {
        let plans = (1..=count)
            .map(|cycle| CyclePlan {
                work: Duration::ZERO,
                simulate_error: error_cycles.contains(&cycle),
            })
            .collect();
        Self::new(plans)
    }
}

impl CycleSource for ScriptedCycleSource {
    fn next_plan(&mut self) -> CyclePlan {
        let plan = self.plans[self.position % self.plans.len()];
        self.position += 1;
        plan
    }
}
