//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-mode file sink, created if missing
pub struct FileSink {
    writer: BufWriter<File>,
    path: PathBuf,
    name: String,
}

impl FileSink {
    /// Open `path` for appending
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::FileSinkError`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            writer: BufWriter::new(file),
            name: format!("file({})", path.display()),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.writer.write_all(buf)?;
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_data()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data reaches the file
        let _ = self.writer.flush();
    }
}
