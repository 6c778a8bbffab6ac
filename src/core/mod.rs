//! Core logger types and traits

pub mod appender;
pub mod encoder;
pub mod error;
pub mod field;
pub mod log_core;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sugared;
pub mod timestamp;
pub mod trace_bit;

pub use appender::Appender;
pub use encoder::{
    DurationEncoding, Encoder, EncoderConfig, JsonEncoder, LogfmtEncoder, OutputFormat,
    TextEncoder,
};
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue};
pub use log_core::{AtomicLevel, Core, IoCore};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::CoreMetrics;
pub use sugared::SugaredLogger;
pub use timestamp::TimestampFormat;
pub use trace_bit::{with_trace_bit_core, TraceBitCore};
