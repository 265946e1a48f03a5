//! Workload metrics shared between the runner and the exporter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Runtime metrics for the synthetic workload.
///
/// A single writer (the workload runner) updates the counters once per
/// completed cycle; any number of readers take snapshots concurrently.
/// The writer increments the request counter before the error counter,
/// and [`WorkMetrics::snapshot`] loads them in the reverse order, so no
/// observer can ever see `error_count > request_count`.
#[derive(Debug, Default)]
pub struct WorkMetrics {
    /// Completed work cycles.
    request_count: AtomicU64,
    /// Cycles flagged as simulated errors.
    error_count: AtomicU64,
    /// Duration of the most recent cycle in milliseconds.
    last_response_time_ms: AtomicU64,
}

impl WorkMetrics {
    /// Creates a fresh metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed work cycle.
    ///
    /// Increments the request counter (and the error counter when the
    /// cycle was flagged) and overwrites the last response time.
    pub fn record_cycle(&self, elapsed_ms: u64, is_error: bool) {
        // Request before error: keeps error_count <= request_count
        // visible to concurrent readers at every instant.
        self.request_count.fetch_add(1, Ordering::Release);
        if is_error {
            self.error_count.fetch_add(1, Ordering::Release);
        }
        self.last_response_time_ms.store(elapsed_ms, Ordering::Release);
    }

    /// Takes a snapshot of all counters.
    ///
    /// Errors are loaded before requests, so the returned pair satisfies
    /// `error_count <= request_count` even while a cycle is being
    /// recorded.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let error_count = self.error_count.load(Ordering::Acquire);
        let request_count = self.request_count.load(Ordering::Acquire);
        let last_response_time_ms = self.last_response_time_ms.load(Ordering::Acquire);

        MetricsSnapshot {
            request_count,
            error_count,
            last_response_time_ms,
        }
    }
}

/// A point-in-time view of the workload metrics.
///
/// The error rate is derived on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// Completed work cycles.
    pub request_count: u64,
    /// Cycles flagged as simulated errors.
    pub error_count: u64,
    /// Duration of the most recent cycle in milliseconds.
    pub last_response_time_ms: u64,
}

impl MetricsSnapshot {
    /// Percentage of cycles flagged as errors, 0.0 when no cycles have
    /// completed.
    pub fn error_rate(&self) -> f64 {
        if self.request_count == 0 {
            return 0.0;
        }
        self.error_count as f64 / self.request_count as f64 * 100.0
    }

    /// Formats the per-cycle console status line.
    pub fn status_line(&self) -> String {
        format!(
            "Request processed: count={}, errors={}, responseTime={}ms",
            self.request_count, self.error_count, self.last_response_time_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_at_zero() {
        let metrics = WorkMetrics::new();
        let snapshot = metrics.snapshot();

        assert_eq!(snapshot.request_count, 0);
        assert_eq!(snapshot.error_count, 0);
        assert_eq!(snapshot.last_response_time_ms, 0);
        assert_eq!(snapshot.error_rate(), 0.0);
    }

    #[test]
    fn test_record_cycle_updates_counters() {
        let metrics = WorkMetrics::new();

        metrics.record_cycle(42, false);
        metrics.record_cycle(17, true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.request_count, 2);
        assert_eq!(snapshot.error_count, 1);
        assert_eq!(snapshot.last_response_time_ms, 17);
    }

    #[test]
    fn test_last_response_time_is_overwritten() {
        let metrics = WorkMetrics::new();

        metrics.record_cycle(100, false);
        metrics.record_cycle(5, false);

        // Only the most recent cycle is retained, not a cumulative sum.
        assert_eq!(metrics.snapshot().last_response_time_ms, 5);
    }

    #[test]
    fn test_error_rate_exact() {
        let metrics = WorkMetrics::new();
        for i in 0..10 {
            metrics.record_cycle(1, i == 2 || i == 6);
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.request_count, 10);
        assert_eq!(snapshot.error_count, 2);
        assert_eq!(snapshot.error_rate(), 20.0);
    }

    #[test]
    fn test_status_line_format() {
        let snapshot = MetricsSnapshot {
            request_count: 12,
            error_count: 3,
            last_response_time_ms: 57,
        };

        assert_eq!(
            snapshot.status_line(),
            "Request processed: count=12, errors=3, responseTime=57ms"
        );
    }

    #[test]
    fn test_concurrent_reads_never_observe_more_errors_than_requests() {
        let metrics = Arc::new(WorkMetrics::new());

        let writer = {
            let metrics = Arc::clone(&metrics);
            thread::spawn(move || {
                for i in 0..20_000u64 {
                    metrics.record_cycle(i % 50, i % 3 == 0);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..20_000 {
                        let snapshot = metrics.snapshot();
                        assert!(snapshot.error_count <= snapshot.request_count);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.request_count, 20_000);
    }

    proptest! {
        #[test]
        fn prop_counters_match_recorded_cycles(
            flags in proptest::collection::vec(any::<bool>(), 0..200)
        ) {
            let metrics = WorkMetrics::new();
            for (i, flag) in flags.iter().enumerate() {
                metrics.record_cycle(i as u64, *flag);
            }

            let snapshot = metrics.snapshot();
            prop_assert_eq!(snapshot.request_count, flags.len() as u64);
            prop_assert_eq!(
                snapshot.error_count,
                flags.iter().filter(|f| **f).count() as u64
            );
            prop_assert!(snapshot.error_count <= snapshot.request_count);
        }

        #[test]
        fn prop_error_rate_matches_formula(
            (requests, errors) in (1u64..10_000).prop_flat_map(|r| (Just(r), 0..=r))
        ) {
            let snapshot = MetricsSnapshot {
                request_count: requests,
                error_count: errors,
                last_response_time_ms: 0,
            };

            let expected = errors as f64 / requests as f64 * 100.0;
            prop_assert_eq!(snapshot.error_rate(), expected);
        }
    }
}
