//! Logger handle and builder

use super::{
    appender::Appender,
    encoder::{Encoder, EncoderConfig, OutputFormat},
    error::Result,
    field::Field,
    log_core::{AtomicLevel, Core, IoCore},
    log_entry::LogEntry,
    log_level::LogLevel,
    sugared::SugaredLogger,
};
use crate::appenders::ConsoleAppender;
use std::sync::Arc;

/// A handle around a [`Core`]
///
/// Cloning is cheap and every clone shares the same core. A logger never
/// changes after construction: [`with`](Self::with) and
/// [`with_core`](Self::with_core) return new loggers.
#[derive(Debug, Clone)]
pub struct Logger {
    core: Arc<dyn Core>,
}

impl Logger {
    #[must_use]
    pub fn new(core: Arc<dyn Core>) -> Self {
        Self { core }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use ctxlog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .format(OutputFormat::Text)
    ///     .build()
    ///     .unwrap();
    /// logger.info("Server started", &[Field::int("port", 8080)]);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn core(&self) -> &Arc<dyn Core> {
        &self.core
    }

    /// A child logger with `fields` attached to every entry
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Logger {
        if fields.is_empty() {
            return self.clone();
        }
        Logger::new(self.core.with(fields))
    }

    /// A logger whose core is `wrap` applied to this logger's core
    #[must_use]
    pub fn with_core<F>(&self, wrap: F) -> Logger
    where
        F: FnOnce(Arc<dyn Core>) -> Arc<dyn Core>,
    {
        Logger::new(wrap(Arc::clone(&self.core)))
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.core.enabled(level)
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>, fields: &[Field]) {
        if !self.core.enabled(level) {
            return;
        }

        let entry = LogEntry::new(level, message).with_fields(fields);
        if !self.core.check(&entry) {
            return;
        }

        if let Err(e) = self.core.write(&entry) {
            eprintln!("[LOGGER ERROR] Failed to write log entry: {}", e);
        }
    }

    #[inline]
    pub fn trace(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log(LogLevel::Trace, message, fields);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log(LogLevel::Info, message, fields);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log(LogLevel::Error, message, fields);
    }

    /// Log at fatal level. The process keeps running.
    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log(LogLevel::Fatal, message, fields);
    }

    pub fn sync(&self) -> Result<()> {
        self.core.sync()
    }

    /// The loosely typed key/value view of this logger
    #[must_use]
    pub fn sugar(&self) -> SugaredLogger {
        SugaredLogger::new(self.clone())
    }

    /// Whether both loggers share the same core instance
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.core), Arc::as_ptr(&other.core))
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use ctxlog::prelude::*;
///
/// let buffer = BufferAppender::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Error)
///     .encoder_config(EncoderConfig::message_only("message"))
///     .appender(buffer.clone())
///     .build()
///     .unwrap();
///
/// logger.warn("filtered", &[]);
/// assert!(buffer.is_empty());
/// ```
pub struct LoggerBuilder {
    level: AtomicLevel,
    format: OutputFormat,
    encoder_config: EncoderConfig,
    encoder: Option<Arc<dyn Encoder>>,
    appender: Option<Box<dyn Appender>>,
    fields: Vec<Field>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: AtomicLevel::new(LogLevel::Info),
            format: OutputFormat::default(),
            encoder_config: EncoderConfig::default(),
            encoder: None,
            appender: None,
            fields: Vec::new(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.level = AtomicLevel::new(level);
        self
    }

    /// Use a shared level that can be changed after the logger is built
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: AtomicLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn encoder_config(mut self, config: EncoderConfig) -> Self {
        self.encoder_config = config;
        self
    }

    /// Use a custom encoder instead of `format` + `encoder_config`
    #[must_use = "builder methods return a new value"]
    pub fn encoder(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Set the output sink. Defaults to stdout.
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    /// Fields attached to every entry of the built logger
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: &[Field]) -> Self {
        self.fields.extend_from_slice(fields);
        self
    }

    /// Build the bare core, without attached fields
    pub fn build_core(self) -> Result<IoCore> {
        self.into_parts().map(|(core, _)| core)
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let (core, fields) = self.into_parts()?;
        Ok(Logger::new(Arc::new(core)).with(&fields))
    }

    fn into_parts(self) -> Result<(IoCore, Vec<Field>)> {
        let encoder = match self.encoder {
            Some(encoder) => {
                encoder.config().validate()?;
                encoder
            }
            None => {
                self.encoder_config.validate()?;
                self.format.encoder(self.encoder_config)
            }
        };
        let appender = self
            .appender
            .unwrap_or_else(|| Box::new(ConsoleAppender::stdout()));

        let core = IoCore::with_shared_appender(
            encoder,
            Arc::new(parking_lot::Mutex::new(appender)),
            self.level,
        );
        Ok((core, self.fields))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
