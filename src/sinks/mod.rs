//! Sink implementations

pub mod buffered;
pub mod console;
pub mod file;
pub mod network;
pub mod writer;

pub use buffered::{BufferedSink, OverflowPolicy, DEFAULT_SHUTDOWN_TIMEOUT};
pub use console::{StderrSink, StdoutSink};
pub use file::FileSink;
pub use network::NetworkSink;
pub use writer::{SharedBuffer, WriterSink};

pub use crate::core::Sink;
