//! Process-wide default logger
//!
//! Installed at most once, either explicitly through [`init_global`] or
//! lazily on first use from [`LoggerConfig::from_env`]. After that it is
//! read-only.

use crate::appenders::ConsoleAppender;
use crate::config::LoggerConfig;
use crate::core::{IoCore, JsonEncoder, LogLevel, Logger, LoggerError, Result, SugaredLogger};
use once_cell::sync::OnceCell;
use std::sync::Arc;

struct Globals {
    logger: Logger,
    sugared: SugaredLogger,
}

impl Globals {
    fn new(logger: Logger) -> Self {
        let sugared = logger.sugar();
        Self { logger, sugared }
    }
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

/// Install the default logger
///
/// Fails with [`LoggerError::AlreadyInitialized`] if a default logger was
/// already installed or lazily created.
pub fn init_global(logger: Logger) -> Result<()> {
    GLOBALS
        .set(Globals::new(logger))
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// Build a logger from `config` and install it as the default
pub fn init_global_from_config(config: &LoggerConfig) -> Result<()> {
    init_global(config.build()?)
}

pub fn is_initialized() -> bool {
    GLOBALS.get().is_some()
}

/// The default logger
pub fn l() -> &'static Logger {
    &globals().logger
}

/// The default sugared logger, sharing the core of [`l`]
pub fn s() -> &'static SugaredLogger {
    &globals().sugared
}

fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals::new(default_logger()))
}

fn default_logger() -> Logger {
    let config = LoggerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("[LOGGER WARNING] Ignoring logger environment: {}", e);
        LoggerConfig::default()
    });

    config.build().unwrap_or_else(|e| {
        eprintln!(
            "[LOGGER WARNING] Failed to build default logger ({}), using stderr",
            e
        );
        let core = IoCore::new(
            Arc::new(JsonEncoder::default()),
            ConsoleAppender::stderr(),
            LogLevel::Info,
        );
        Logger::new(Arc::new(core))
    })
}
