//! Global busy indicator.
//!
//! Counts in-flight requests instead of toggling a flag, so overlapping
//! calls keep the indicator on until the last one settles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct BusyTracker {
    inner: Arc<BusyInner>,
}

struct BusyInner {
    in_flight: AtomicUsize,
    busy_tx: watch::Sender<bool>,
}

impl BusyTracker {
    pub fn new() -> Self {
        let (busy_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(BusyInner {
                in_flight: AtomicUsize::new(0),
                busy_tx,
            }),
        }
    }

    /// Mark one request as started; the returned guard marks it settled on drop
    pub fn begin(&self) -> BusyGuard {
        let previous = self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
        if previous == 0 {
            self.inner.busy_tx.send_replace(true);
        }
        BusyGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    /// Observe busy transitions (drives a spinner)
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.busy_tx.subscribe()
    }
}

impl Default for BusyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BusyTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyTracker")
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

pub struct BusyGuard {
    inner: Arc<BusyInner>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let previous = self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        if previous == 1 {
            self.inner.busy_tx.send_replace(false);
        }
    }
}
