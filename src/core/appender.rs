//! Appender trait for log output destinations

use super::error::Result;

/// A sink for encoded log lines
///
/// `append` receives one fully encoded entry without its trailing newline.
pub trait Appender: Send {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
