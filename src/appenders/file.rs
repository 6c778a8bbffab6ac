//! File appender implementation

use crate::core::{Appender, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileAppender {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
}

impl FileAppender {
    /// Open `path` for appending, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_appender() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.log");

        let mut appender = FileAppender::new(&log_path)?;
        appender.append(r#"{"message":"first"}"#)?;
        appender.append(r#"{"message":"second"}"#)?;
        appender.flush()?;

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("second"));
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let dir = tempdir().unwrap();
        let result = FileAppender::new(dir.path().join("missing").join("app.log"));
        assert!(matches!(result, Err(LoggerError::FileAppenderError { .. })));
    }
}
