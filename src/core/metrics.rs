//! Write counters for an [`IoCore`](super::IoCore)
//!
//! Shared by every core derived from the same root through `with`, so the
//! counts describe the sink rather than a single logger handle.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct CoreMetrics {
    /// Entries successfully handed to the appender
    written: AtomicU64,

    /// Entries lost to an encoder or appender failure
    failed: AtomicU64,
}

impl CoreMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for CoreMetrics {
    fn default() -> Self {
        Self::new()
    }
}
