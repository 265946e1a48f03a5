//! The work simulation loop.
//!
//! Each cycle sleeps for the planned duration, records the outcome in
//! the shared counters, and prints a status line. The loop has no exit
//! condition of its own; it runs until the shutdown signal fires, at
//! which point any in-flight cycle is abandoned without touching the
//! counters.

use super::{CycleSource, ShutdownSignal, WorkloadConfig};
use crate::telemetry::WorkMetrics;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Drives simulated work cycles until cancelled.
pub struct WorkloadRunner<S: CycleSource> {
    config: WorkloadConfig,
    source: S,
    metrics: Arc<WorkMetrics>,
    shutdown: ShutdownSignal,
}

impl<S: CycleSource> WorkloadRunner<S> {
    /// Creates a runner over the shared metrics.
    pub fn new(
        config: WorkloadConfig,
        source: S,
        metrics: Arc<WorkMetrics>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            config,
            source,
            metrics,
            shutdown,
        }
    }

    /// Runs cycles until the shutdown signal fires.
    pub fn run(&mut self) {
        tracing::info!(
            min_work_ms = self.config.min_work_ms,
            max_work_ms = self.config.max_work_ms,
            error_window = self.config.error_window,
            "Workload started"
        );

        loop {
            if !self.cycle() {
                break;
            }
            if !self.pace() {
                break;
            }
        }

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            requests = snapshot.request_count,
            errors = snapshot.error_count,
            "Workload stopped"
        );
    }

    /// Runs at most `count` cycles, stopping early on shutdown.
    pub fn run_cycles(&mut self, count: u64) {
        for completed in 0..count {
            if !self.cycle() {
                tracing::debug!(completed, "Workload cancelled mid-run");
                break;
            }
            if completed + 1 < count && !self.pace() {
                break;
            }
        }
    }

    /// Runs one cycle. Returns false if cancelled before completion.
    fn cycle(&mut self) -> bool {
        if self.shutdown.is_triggered() {
            return false;
        }

        let plan = self.source.next_plan();
        let start = Instant::now();

        // Simulated work. Cancellation abandons the cycle: no counter
        // moves, no status line.
        if !self.shutdown.sleep(plan.work) {
            return false;
        }

        if plan.simulate_error {
            tracing::debug!("Simulated error occurred");
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;
        self.metrics.record_cycle(elapsed_ms, plan.simulate_error);

        println!("{}", self.metrics.snapshot().status_line());
        true
    }

    /// Inter-cycle pacing sleep. Returns false on shutdown.
    fn pace(&self) -> bool {
        self.shutdown
            .sleep(Duration::from_millis(self.config.cycle_interval_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{CyclePlan, ScriptedCycleSource};
    use std::thread;

    fn instant_config() -> WorkloadConfig {
        WorkloadConfig {
            cycle_interval_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_ten_cycles_with_errors_on_three_and_seven() {
        let metrics = Arc::new(WorkMetrics::new());
        let source = ScriptedCycleSource::with_error_cycles(10, &[3, 7]);
        let mut runner = WorkloadRunner::new(
            instant_config(),
            source,
            Arc::clone(&metrics),
            ShutdownSignal::new(),
        );

        runner.run_cycles(10);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.request_count, 10);
        assert_eq!(snapshot.error_count, 2);
        assert_eq!(snapshot.error_rate(), 20.0);
    }

    #[test]
    fn test_pre_triggered_shutdown_runs_no_cycles() {
        let metrics = Arc::new(WorkMetrics::new());
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();

        let mut runner = WorkloadRunner::new(
            instant_config(),
            ScriptedCycleSource::with_error_cycles(10, &[]),
            Arc::clone(&metrics),
            shutdown,
        );
        runner.run();

        assert_eq!(metrics.snapshot().request_count, 0);
    }

    #[test]
    fn test_cancellation_abandons_inflight_cycle() {
        let metrics = Arc::new(WorkMetrics::new());
        let shutdown = ShutdownSignal::new();
        let trigger = shutdown.clone();

        let waker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            trigger.trigger();
        });

        let plans = vec![CyclePlan {
            work: Duration::from_secs(60),
            simulate_error: false,
        }];
        let mut runner = WorkloadRunner::new(
            instant_config(),
            ScriptedCycleSource::new(plans),
            Arc::clone(&metrics),
            shutdown,
        );

        let start = Instant::now();
        runner.run();
        waker.join().unwrap();

        // Prompt return, and the abandoned cycle was never counted.
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(metrics.snapshot().request_count, 0);
    }

    #[test]
    fn test_elapsed_covers_planned_work() {
        let metrics = Arc::new(WorkMetrics::new());
        let plans = vec![CyclePlan {
            work: Duration::from_millis(15),
            simulate_error: false,
        }];
        let mut runner = WorkloadRunner::new(
            instant_config(),
            ScriptedCycleSource::new(plans),
            Arc::clone(&metrics),
            ShutdownSignal::new(),
        );

        runner.run_cycles(1);

        assert!(metrics.snapshot().last_response_time_ms >= 15);
    }

    #[test]
    fn test_run_cycles_stops_at_count() {
        let metrics = Arc::new(WorkMetrics::new());
        let mut runner = WorkloadRunner::new(
            instant_config(),
            ScriptedCycleSource::with_error_cycles(3, &[1]),
            Arc::clone(&metrics),
            ShutdownSignal::new(),
        );

        runner.run_cycles(3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.request_count, 3);
        assert_eq!(snapshot.error_count, 1);
    }
}
