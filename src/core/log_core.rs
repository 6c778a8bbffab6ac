//! The `Core` capability and its level-filtering implementation
//!
//! A [`Core`] decides whether an entry is accepted and, once accepted,
//! encodes and writes it. [`Logger`](super::Logger) is only a handle around
//! an `Arc<dyn Core>`; every derivation (`with`, trace-bit wrapping) produces
//! a new core and leaves the original untouched.

use super::appender::Appender;
use super::encoder::Encoder;
use super::error::Result;
use super::field::Field;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::metrics::CoreMetrics;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

pub trait Core: Send + Sync + fmt::Debug {
    /// Whether an entry at `level` would be accepted
    fn enabled(&self, level: LogLevel) -> bool;

    /// Whether this particular entry should be written
    fn check(&self, entry: &LogEntry) -> bool {
        self.enabled(entry.level)
    }

    /// A new core with `fields` permanently attached after the existing ones
    fn with(&self, fields: &[Field]) -> Arc<dyn Core>;

    /// Encode and write an entry that already passed `check`
    ///
    /// Implementations must not re-apply level filtering here.
    fn write(&self, entry: &LogEntry) -> Result<()>;

    /// Flush any buffered output
    fn sync(&self) -> Result<()>;

    /// Whether the core bypasses level filtering
    fn is_trace_bit(&self) -> bool {
        false
    }
}

/// A minimum level shared between every core built from it
///
/// Cloning shares the underlying value, so [`set_level`](Self::set_level)
/// changes the threshold of all cores holding a clone.
#[derive(Debug, Clone, Default)]
pub struct AtomicLevel {
    level: Arc<RwLock<LogLevel>>,
}

impl AtomicLevel {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: Arc::new(RwLock::new(level)),
        }
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= *self.level.read()
    }
}

impl From<LogLevel> for AtomicLevel {
    fn from(level: LogLevel) -> Self {
        Self::new(level)
    }
}

pub(crate) type SharedAppender = Arc<Mutex<Box<dyn Appender>>>;

/// The standard core: level filter, encoder and appender
pub struct IoCore {
    level: AtomicLevel,
    encoder: Arc<dyn Encoder>,
    appender: SharedAppender,
    fields: Vec<Field>,
    metrics: Arc<CoreMetrics>,
}

impl IoCore {
    pub fn new<A: Appender + 'static>(
        encoder: Arc<dyn Encoder>,
        appender: A,
        level: impl Into<AtomicLevel>,
    ) -> Self {
        Self::with_shared_appender(encoder, Arc::new(Mutex::new(Box::new(appender))), level)
    }

    pub(crate) fn with_shared_appender(
        encoder: Arc<dyn Encoder>,
        appender: SharedAppender,
        level: impl Into<AtomicLevel>,
    ) -> Self {
        Self {
            level: level.into(),
            encoder,
            appender,
            fields: Vec::new(),
            metrics: Arc::new(CoreMetrics::new()),
        }
    }

    pub fn level(&self) -> &AtomicLevel {
        &self.level
    }

    pub fn metrics(&self) -> &CoreMetrics {
        &self.metrics
    }

    /// Fields attached through `with`
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl fmt::Debug for IoCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IoCore")
            .field("level", &self.level.level())
            .field("encoder", &self.encoder)
            .field(
                "appender",
                &self.appender.try_lock().map(|a| a.name().to_string()),
            )
            .field("fields", &self.fields)
            .finish()
    }
}

impl Core for IoCore {
    #[inline]
    fn enabled(&self, level: LogLevel) -> bool {
        self.level.enabled(level)
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Core> {
        let mut merged = Vec::with_capacity(self.fields.len() + fields.len());
        merged.extend_from_slice(&self.fields);
        merged.extend_from_slice(fields);

        Arc::new(IoCore {
            level: self.level.clone(),
            encoder: Arc::clone(&self.encoder),
            appender: Arc::clone(&self.appender),
            fields: merged,
            metrics: Arc::clone(&self.metrics),
        })
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let line = match self.encoder.encode(entry, &self.fields) {
            Ok(line) => line,
            Err(e) => {
                self.metrics.record_failed();
                return Err(e);
            }
        };

        let mut appender = self.appender.lock();
        let result = appender.append(&line).and_then(|()| {
            // Fatal entries are flushed immediately
            if entry.level > LogLevel::Error {
                appender.flush()
            } else {
                Ok(())
            }
        });

        match result {
            Ok(()) => {
                self.metrics.record_written();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failed();
                Err(e)
            }
        }
    }

    fn sync(&self) -> Result<()> {
        self.appender.lock().flush()
    }
}
