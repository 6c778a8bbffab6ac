//! Log entry structure

use super::field::Field;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::cell::RefCell;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// One log record, produced by a log call and consumed by a [`Core`](super::Core)
///
/// `fields` holds only the call-site fields; fields attached to the logger
/// live in the core and are merged in front of these at encode time.
/// `message` is kept verbatim. Line-oriented encoders escape control
/// characters when they write it.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    pub fields: Vec<Field>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: message.as_ref().to_string(),
            timestamp: Utc::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: &[Field]) -> Self {
        self.fields.extend_from_slice(fields);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
