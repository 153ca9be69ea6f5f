//! # Looog
//!
//! A structured-logging facade: leveled messages are encoded as JSON objects
//! or console text lines and teed to any number of output sinks.
//!
//! ## Features
//!
//! - **Two encoders**: JSON lines and separator-joined console text
//! - **Tee**: every core filters by its own level and writes to its own sink
//! - **Configurable keys**: time, level, and caller keys plus their formats
//! - **Global functions**: `looog::info("...")` writes through a default logger
//! - **Thread safe**: loggers are `Send + Sync` and cheap to share
//!
//! ## Example
//!
//! ```
//! use looog::prelude::*;
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::builder()
//!     .style(Style::Json)
//!     .level(LogLevel::Info)
//!     .output(buffer.clone())
//!     .build();
//!
//! logger.debug("not written");
//! logger.infow("user login", fields!("user" => "alice"));
//! logger.sync().unwrap();
//!
//! assert_eq!(buffer.lines().len(), 1);
//! assert!(buffer.contents().contains(r#""user":"alice""#));
//! ```

pub mod core;
pub mod encoders;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallerFormat, Core, EncoderConfig, FieldValue, Fields, LevelFormat, LogConfig, LogLevel,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, Result, Sink, Style, TimestampFormat,
    };
    pub use crate::fields;
    pub use crate::sinks::{FileSink, SharedBuffer, StderrSink, StdoutSink};
}

pub use self::core::{
    Caller, CallerFormat, Core, DurationFormat, Encoder, EncoderConfig, FieldValue, Fields,
    LevelFormat, LogConfig, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Result, Sink, Style, Tee, TimestampFormat, CS_FULL, CS_NONE, DEFAULT_LAYOUT,
    LF_CAPITAL, LF_COLOR, LF_NONE,
};
pub use encoders::{ConsoleEncoder, JsonEncoder};
pub use global::{
    debug, debugf, debugw, default_logger, error, errorf, errorw, fatal, fatalf, fatalw, info,
    infof, infow, log, log_with, new_default_logger, panic, panicf, panicw, print, printf, println,
    set_default, sync, warn, warnf, warnw,
};
pub use sinks::{BufferedSink, FileSink, NetworkSink, OverflowPolicy, StderrSink, StdoutSink};
