//! Logging macros for ergonomic message formatting.
//!
//! The message is formatted like `format!`, and only when the level is
//! enabled. Structured fields follow a `;` as `key => value` pairs.
//!
//! # Examples
//!
//! ```
//! use ctxlog::prelude::*;
//! use ctxlog::info;
//!
//! let ctx = Context::background();
//!
//! info!(g(&ctx), "Server started");
//!
//! let port = 8080;
//! info!(g(&ctx), "Server listening on port {}", port);
//!
//! info!(g(&ctx), "Request handled"; "status" => 200, "path" => "/health");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use ctxlog::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use ctxlog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500; "retry" => false);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* ; $($key:expr => $value:expr),+ $(,)?) => {{
        let __logger = &$logger;
        let __level = $level;
        if __logger.enabled(__level) {
            __logger.log(
                __level,
                format!($fmt $(, $arg)*),
                &[$($crate::Field::new($key, $value)),+],
            );
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let __logger = &$logger;
        let __level = $level;
        if __logger.enabled(__level) {
            __logger.log(__level, format!($($arg)+), &[]);
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use ctxlog::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use ctxlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message. The process keeps running.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::BufferAppender;
    use crate::core::{EncoderConfig, LogLevel, Logger};

    fn logger(level: LogLevel) -> (Logger, BufferAppender) {
        let buffer = BufferAppender::new();
        let logger = Logger::builder()
            .min_level(level)
            .encoder_config(EncoderConfig::message_only("message"))
            .appender(buffer.clone())
            .build()
            .unwrap();
        (logger, buffer)
    }

    #[test]
    fn test_log_macro_formats() {
        let (logger, buffer) = logger(LogLevel::Info);
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        assert_eq!(buffer.contents(), "{\"message\":\"Formatted: 42\"}\n");
    }

    #[test]
    fn test_fields_after_semicolon() {
        let (logger, buffer) = logger(LogLevel::Info);
        let user = "alice";
        info!(logger, "User {} logged in", user; "user_id" => 123, "admin" => false);

        let parsed: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed["message"], "User alice logged in");
        assert_eq!(parsed["user_id"], 123);
        assert_eq!(parsed["admin"], false);
    }

    #[test]
    fn test_disabled_level_writes_nothing() {
        let (logger, buffer) = logger(LogLevel::Error);
        debug!(logger, "Debug message");
        trace!(logger, "Trace {}", 1; "k" => "v");
        warn!(logger, "Warning message");
        assert!(buffer.is_empty());

        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");
        assert_eq!(buffer.lines().len(), 2);
    }
}
