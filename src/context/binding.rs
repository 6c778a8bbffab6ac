//! Binding a [`Logger`] to a [`Context`]
//!
//! Request-handling code carries a `Context` end to end; these functions
//! attach a logger to it and recover that logger further down the call
//! chain, falling back to the process-wide default when none was bound.

use super::Context;
use crate::core::{trace_bit, Logger, SugaredLogger};
use crate::global;

/// Private key type, so no other crate can bind or shadow the logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoggerKey;

/// A child of `ctx` carrying `logger`
#[must_use]
pub fn with_logger(ctx: &Context, logger: Logger) -> Context {
    ctx.with_value(LoggerKey, logger)
}

fn bound(ctx: &Context) -> Option<&Logger> {
    ctx.value::<LoggerKey, Logger>(&LoggerKey)
}

/// The logger bound in `ctx`, or the global default
pub fn g(ctx: &Context) -> Logger {
    bound(ctx).unwrap_or_else(|| global::l()).clone()
}

/// The sugared view of the logger bound in `ctx`, or the global default
pub fn s(ctx: &Context) -> SugaredLogger {
    match bound(ctx) {
        Some(logger) => logger.sugar(),
        None => global::s().clone(),
    }
}

/// A child of `ctx` whose logger logs at every level
///
/// The logger currently visible through [`g`] is rewrapped with the trace-bit
/// core; neither `ctx` nor that logger is changed.
#[must_use]
pub fn with_trace_bit_logger(ctx: &Context) -> Context {
    with_logger(ctx, trace_bit::with_trace_bit_core(&g(ctx)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::BufferAppender;
    use crate::core::{EncoderConfig, LogLevel};

    fn error_logger() -> (Logger, BufferAppender) {
        let buffer = BufferAppender::new();
        let logger = Logger::builder()
            .min_level(LogLevel::Error)
            .encoder_config(EncoderConfig::message_only("message"))
            .appender(buffer.clone())
            .build()
            .unwrap();
        (logger, buffer)
    }

    #[test]
    fn test_empty_context_falls_back_to_global() {
        let ctx = Context::background();
        assert!(g(&ctx).ptr_eq(global::l()));
        assert!(s(&ctx).ptr_eq(global::s()));
    }

    #[test]
    fn test_unrelated_bindings_fall_back_to_global() {
        #[derive(PartialEq)]
        struct Unrelated;

        let ctx = Context::background().with_value(Unrelated, 42_u8);
        assert!(g(&ctx).ptr_eq(global::l()));
    }

    #[test]
    fn test_bound_logger_is_returned() {
        let (logger, _) = error_logger();
        let ctx = with_logger(&Context::background(), logger.clone());
        assert!(g(&ctx).ptr_eq(&logger));
        assert!(s(&ctx).desugar().ptr_eq(&logger));
    }

    #[test]
    fn test_inner_binding_wins() {
        let (outer, _) = error_logger();
        let (inner, _) = error_logger();
        let ctx = with_logger(&with_logger(&Context::background(), outer.clone()), inner.clone());
        assert!(g(&ctx).ptr_eq(&inner));
    }

    #[test]
    fn test_trace_bit_logger_leaves_parent_untouched() {
        let (logger, buffer) = error_logger();
        let parent = with_logger(&Context::background(), logger.clone());
        let traced = with_trace_bit_logger(&parent);

        g(&parent).debug("filtered", &[]);
        assert!(buffer.is_empty());

        g(&traced).debug("emitted", &[]);
        assert!(buffer.contents().contains("emitted"));
        assert!(g(&parent).ptr_eq(&logger));
    }
}
