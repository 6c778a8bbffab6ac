//! Appender over any `std::io::Write`

use crate::core::{Appender, LoggerError, Result};
use std::io::Write;

/// Writes each line followed by `\n` to the wrapped writer
pub struct WriterAppender<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self::named(writer, "writer")
    }

    pub fn named(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .map_err(|e| LoggerError::io_operation("appending log line", self.name.clone(), e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
