//! Console sinks writing to the process's stdout or stderr

use crate::core::{Result, Sink};
use std::io::Write;

pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        StdoutSink
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdoutSink {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        std::io::stdout().lock().write_all(buf)?;
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

pub struct StderrSink;

impl StderrSink {
    pub fn new() -> Self {
        StderrSink
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StderrSink {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        std::io::stderr().lock().write_all(buf)?;
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stderr"
    }
}
