//! Sinks over arbitrary `io::Write` targets

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Adapts any `Write + Send` value into a [`Sink`]
pub struct WriterSink<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.writer.write_all(buf)?;
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// In-memory sink whose clones share one buffer
///
/// Useful to capture output in tests or to inspect what a core wrote.
///
/// ```
/// use looog::sinks::SharedBuffer;
/// use looog::{LevelFormat, Logger};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .output(buffer.clone())
///     .level_format(LevelFormat::Capital)
///     .build();
/// logger.info("captured");
/// assert!(buffer.contents().contains("captured"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Sink for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.inner.lock().extend_from_slice(buf);
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "buffer"
    }
}
