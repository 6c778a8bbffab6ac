//! Logger configuration
//!
//! [`LoggerConfig`] describes a complete logger: minimum level, output
//! format, encoder keys and sink. It can be deserialized from JSON or read
//! from `CTXLOG_*` environment variables, and is what the global default
//! logger is built from when nothing was installed explicitly.

use crate::appenders::{ConsoleAppender, FileAppender};
use crate::core::{EncoderConfig, LogLevel, Logger, LoggerError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_LEVEL: &str = "CTXLOG_LEVEL";
pub const ENV_FORMAT: &str = "CTXLOG_FORMAT";
pub const ENV_OUTPUT: &str = "CTXLOG_OUTPUT";

/// Where the built logger writes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    Stdout,
    #[default]
    Stderr,
    File(PathBuf),
}

impl OutputTarget {
    /// `stdout`, `stderr`, or anything else as a file path
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "stdout" | "-" => OutputTarget::Stdout,
            "stderr" => OutputTarget::Stderr,
            path => OutputTarget::File(PathBuf::from(path)),
        }
    }
}

/// # Example
///
/// ```
/// use ctxlog::config::LoggerConfig;
/// use ctxlog::LogLevel;
///
/// let config = LoggerConfig::from_json(r#"{"level": "debug", "format": "logfmt"}"#).unwrap();
/// assert_eq!(config.level, LogLevel::Debug);
/// let logger = config.build().unwrap();
/// assert!(logger.enabled(LogLevel::Debug));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: OutputFormat,
    pub output: OutputTarget,
    #[serde(flatten)]
    pub encoder: EncoderConfig,
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `CTXLOG_LEVEL`, `CTXLOG_FORMAT` and `CTXLOG_OUTPUT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LEVEL) {
            config.level = level
                .parse()
                .map_err(|message: String| LoggerError::config(ENV_LEVEL, message))?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            config.format = format
                .parse()
                .map_err(|message: String| LoggerError::config(ENV_FORMAT, message))?;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            if output.trim().is_empty() {
                return Err(LoggerError::config(ENV_OUTPUT, "output must not be empty"));
            }
            config.output = OutputTarget::parse(&output);
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    pub fn build(&self) -> Result<Logger> {
        let builder = Logger::builder()
            .min_level(self.level)
            .format(self.format)
            .encoder_config(self.encoder.clone());

        match &self.output {
            OutputTarget::Stdout => builder.appender(ConsoleAppender::stdout()).build(),
            OutputTarget::Stderr => builder.appender(ConsoleAppender::stderr()).build(),
            OutputTarget::File(path) => builder.appender(FileAppender::new(path)?).build(),
        }
    }
}
