//! In-memory appender
//!
//! Clones share one buffer, so a test can hand one clone to a logger and
//! read what was written through another.

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct BufferAppender {
    buffer: Arc<Mutex<String>>,
}

impl BufferAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, newline-terminated per entry
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(String::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn reset(&self) {
        self.buffer.lock().clear();
    }
}

impl Appender for BufferAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        let mut buffer = self.buffer.lock();
        buffer.push_str(line);
        buffer.push('\n');
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "buffer"
    }
}
