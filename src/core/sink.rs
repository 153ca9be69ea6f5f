//! Sink trait for log output destinations

use super::error::Result;

/// A destination for encoded log lines
///
/// Sinks receive fully encoded bytes, line ending included. They are owned by
/// a [`Core`](super::Core), which serialises access with a mutex.
pub trait Sink: Send {
    fn write(&mut self, buf: &[u8]) -> Result<()>;
    /// Push buffered output to the underlying destination
    fn sync(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        (**self).write(buf)
    }

    fn sync(&mut self) -> Result<()> {
        (**self).sync()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
