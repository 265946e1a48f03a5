//! Cooperative shutdown signalling.
//!
//! The runner only ever suspends inside interruptible sleeps; triggering
//! the signal wakes any in-flight sleep immediately, so cancellation is
//! prompt without killing the thread.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Cloneable cancellation handle.
///
/// Shared between the workload runner and the process signal handler.
/// Once triggered it stays triggered.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    triggered: Mutex<bool>,
    cv: Condvar,
}

impl ShutdownSignal {
    /// Creates a new, untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown, waking any in-flight sleep.
    pub fn trigger(&self) {
        let mut triggered = self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *triggered = true;
        self.inner.cv.notify_all();
    }

    /// Returns true once shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        *self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleeps for `timeout` unless shutdown is requested first.
    ///
    /// Returns true if the full duration elapsed, false if the sleep
    /// was interrupted (or shutdown was already requested).
    pub fn sleep(&self, timeout: Duration) -> bool {
        let triggered = self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if *triggered {
            return false;
        }
        if timeout.is_zero() {
            return true;
        }

        let (triggered, _timeout_result) = self
            .inner
            .cv
            .wait_timeout_while(triggered, timeout, |triggered| !*triggered)
            .unwrap_or_else(PoisonError::into_inner);

        !*triggered
    }
}
