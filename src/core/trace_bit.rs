//! Trace-bit override
//!
//! [`TraceBitCore`] wraps any other [`Core`] and accepts every entry
//! regardless of the wrapped core's minimum level. Encoding, attached fields
//! and the sink are all those of the wrapped core, so the output of a
//! trace-bit logger is indistinguishable from normal output apart from the
//! levels that get through.

use super::error::Result;
use super::field::Field;
use super::log_core::Core;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::logger::Logger;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TraceBitCore {
    inner: Arc<dyn Core>,
}

impl TraceBitCore {
    pub fn new(inner: Arc<dyn Core>) -> Self {
        Self { inner }
    }

    /// The wrapped core
    pub fn inner(&self) -> &Arc<dyn Core> {
        &self.inner
    }
}

impl Core for TraceBitCore {
    #[inline]
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    #[inline]
    fn check(&self, _entry: &LogEntry) -> bool {
        true
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Core> {
        Arc::new(TraceBitCore::new(self.inner.with(fields)))
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        self.inner.write(entry)
    }

    fn sync(&self) -> Result<()> {
        self.inner.sync()
    }

    fn is_trace_bit(&self) -> bool {
        true
    }
}

/// Wrap a core so it accepts entries at every level
///
/// A core that already bypasses filtering is returned as is.
pub fn wrap_core(core: Arc<dyn Core>) -> Arc<dyn Core> {
    if core.is_trace_bit() {
        core
    } else {
        Arc::new(TraceBitCore::new(core))
    }
}

/// A logger sharing `logger`'s sink and fields that logs at every level
///
/// `logger` itself keeps its configured threshold.
pub fn with_trace_bit_core(logger: &Logger) -> Logger {
    logger.with_core(wrap_core)
}
