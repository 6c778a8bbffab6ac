//! Console appender implementation

use crate::core::{Appender, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Which standard stream a [`ConsoleAppender`] writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

pub struct ConsoleAppender {
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line)?,
            ConsoleTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            ConsoleTarget::Stdout => "stdout",
            ConsoleTarget::Stderr => "stderr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_names() {
        assert_eq!(ConsoleAppender::stdout().name(), "stdout");
        assert_eq!(ConsoleAppender::stderr().name(), "stderr");
        assert_eq!(ConsoleAppender::default().target(), ConsoleTarget::Stdout);
    }

    #[test]
    fn test_console_append() {
        let mut appender = ConsoleAppender::stderr();
        assert!(appender.append("console appender test line").is_ok());
        assert!(appender.flush().is_ok());
    }
}
