//! # ctxlog
//!
//! Context-scoped structured logging with a per-request trace bit.
//!
//! ## Features
//!
//! - **Context binding**: attach a [`Logger`] to a [`Context`] and recover it
//!   anywhere down the call chain, with a process-wide default as fallback
//! - **Trace bit**: force one request's logger to emit every level without
//!   touching the global threshold
//! - **Structured fields**: ordered key/value fields, attached permanently
//!   or per call
//! - **Thread Safe**: loggers, cores and contexts are immutable and shared
//!
//! ```
//! use ctxlog::prelude::*;
//!
//! let buffer = BufferAppender::new();
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Error)
//!     .appender(buffer.clone())
//!     .build()
//!     .unwrap();
//!
//! let ctx = with_logger(&Context::background(), logger);
//! g(&ctx).debug("hidden", &[]);
//! assert!(buffer.is_empty());
//!
//! let traced = with_trace_bit_logger(&ctx);
//! g(&traced).debug("visible", &[Field::string("request_id", "r-1")]);
//! assert!(buffer.contents().contains("visible"));
//! ```

pub mod appenders;
pub mod config;
pub mod context;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{BufferAppender, ConsoleAppender, FileAppender, WriterAppender};
    pub use crate::config::{LoggerConfig, OutputTarget};
    pub use crate::context::binding::{g, s, with_logger, with_trace_bit_logger};
    pub use crate::context::Context;
    pub use crate::core::{
        with_trace_bit_core, Appender, AtomicLevel, Core, DurationEncoding, EncoderConfig, Field,
        FieldValue, IoCore, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, OutputFormat,
        Result, SugaredLogger, TimestampFormat, TraceBitCore,
    };
}

pub use crate::appenders::{BufferAppender, ConsoleAppender, FileAppender, WriterAppender};
pub use crate::config::{LoggerConfig, OutputTarget};
pub use crate::context::binding::{g, s, with_logger, with_trace_bit_logger};
pub use crate::context::Context;
pub use crate::core::{
    with_trace_bit_core, Appender, AtomicLevel, Core, CoreMetrics, DurationEncoding, Encoder,
    EncoderConfig, Field, FieldValue, IoCore, JsonEncoder, LogEntry, LogLevel, LogfmtEncoder,
    Logger, LoggerBuilder, LoggerError, OutputFormat, Result, SugaredLogger, TextEncoder,
    TimestampFormat, TraceBitCore,
};
pub use crate::global::init_global;
