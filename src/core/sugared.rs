//! Loosely typed calling convention over [`Logger`]
//!
//! Filtering and binding are identical to the wrapped logger; only the way
//! fields are passed differs: as `(key, value)` pairs of anything that
//! converts into a [`FieldValue`].

use super::field::{Field, FieldValue};
use super::log_level::LogLevel;
use super::logger::Logger;

#[derive(Debug, Clone)]
pub struct SugaredLogger {
    base: Logger,
}

fn collect_fields<I, K, V>(kvs: I) -> Vec<Field>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    kvs.into_iter().map(|(k, v)| Field::new(k, v)).collect()
}

impl SugaredLogger {
    pub fn new(base: Logger) -> Self {
        Self { base }
    }

    /// The strongly typed logger underneath
    pub fn desugar(&self) -> &Logger {
        &self.base
    }

    #[must_use]
    pub fn with<I, K, V>(&self, kvs: I) -> SugaredLogger
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        SugaredLogger::new(self.base.with(&collect_fields(kvs)))
    }

    pub fn logw<I, K, V>(&self, level: LogLevel, message: impl AsRef<str>, kvs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        if !self.base.enabled(level) {
            return;
        }
        self.base.log(level, message, &collect_fields(kvs));
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.base.log(level, message, &[]);
    }

    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn tracew<I, K, V>(&self, message: impl AsRef<str>, kvs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Trace, message, kvs);
    }

    pub fn debugw<I, K, V>(&self, message: impl AsRef<str>, kvs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Debug, message, kvs);
    }

    pub fn infow<I, K, V>(&self, message: impl AsRef<str>, kvs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Info, message, kvs);
    }

    pub fn warnw<I, K, V>(&self, message: impl AsRef<str>, kvs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Warn, message, kvs);
    }

    pub fn errorw<I, K, V>(&self, message: impl AsRef<str>, kvs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Error, message, kvs);
    }

    /// Logs at `Fatal` and returns; the process keeps running
    pub fn fatalw<I, K, V>(&self, message: impl AsRef<str>, kvs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Fatal, message, kvs);
    }

    pub fn ptr_eq(&self, other: &SugaredLogger) -> bool {
        self.base.ptr_eq(&other.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::BufferAppender;
    use crate::core::EncoderConfig;

    fn sugared(level: LogLevel) -> (SugaredLogger, BufferAppender) {
        let buffer = BufferAppender::new();
        let logger = Logger::builder()
            .min_level(level)
            .encoder_config(EncoderConfig::message_only("message"))
            .appender(buffer.clone())
            .build()
            .unwrap();
        (logger.sugar(), buffer)
    }

    #[test]
    fn test_key_value_pairs() {
        let (sugar, buffer) = sugared(LogLevel::Debug);
        sugar.infow("login", [("user", "alice"), ("method", "password")]);

        let parsed: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed["user"], "alice");
        assert_eq!(parsed["method"], "password");
    }

    #[test]
    fn test_same_filtering_as_base() {
        let (sugar, buffer) = sugared(LogLevel::Warn);
        sugar.infow("dropped", [("k", 1_i64)]);
        sugar.info("dropped");
        sugar.errorw("kept", [("k", 2_i64)]);
        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_with_and_desugar() {
        let (sugar, buffer) = sugared(LogLevel::Info);
        let child = sugar.with([("request_id", "abc-123")]);
        child.desugar().info("handled", &[Field::int("status", 200)]);

        let parsed: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed["request_id"], "abc-123");
        assert_eq!(parsed["status"], 200);
        assert!(!child.ptr_eq(&sugar));
    }

    #[test]
    fn test_trace_and_fatal_helpers() {
        let (sugar, buffer) = sugared(LogLevel::Info);
        sugar.trace("dropped");
        sugar.tracew("dropped", [("k", 1_i64)]);
        assert!(buffer.is_empty());

        sugar.fatal("kept");
        sugar.fatalw("kept", [("k", 2_i64)]);
        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(parsed["k"], 2);
    }
}
