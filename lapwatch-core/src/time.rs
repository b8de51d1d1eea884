//! Millisecond time sources
//!
//! The state machines never read the time themselves. Actions carry a `now`
//! reading taken from a [`TimeSource`] at the moment the event happened, so
//! reducers stay pure and tests can drive time by hand with [`ManualTime`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A monotonic clock reading in milliseconds.
///
/// Implementations must be cheap to clone: a copy is moved into every
/// scheduled tick task.
pub trait TimeSource: Clone + Send + Sync + 'static {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}

/// Real time, measured from the moment the source was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven time for tests and simulations.
///
/// Clones share the same reading.
///
/// ```
/// use lapwatch_core::time::{ManualTime, TimeSource};
///
/// let time = ManualTime::new(0);
/// let handle = time.clone();
/// handle.advance(1500);
/// assert_eq!(time.now_ms(), 1500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Arc<AtomicU64>,
}

impl ManualTime {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Jump to an absolute reading.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    /// Move forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
