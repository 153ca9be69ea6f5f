//! Core logger types and traits

pub mod config;
pub mod encoder;
pub mod encoder_config;
pub mod error;
pub mod fields;
pub mod log_config;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod tee;
pub mod timestamp;

pub use config::LoggerConfig;
pub use encoder::{Encoder, Style};
pub use encoder_config::{
    CallerFormat, DurationFormat, EncoderConfig, LevelFormat, CS_FULL, CS_NONE, LF_CAPITAL,
    LF_COLOR, LF_NONE,
};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use log_config::LogConfig;
pub use log_entry::{Caller, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
pub use tee::{Core, Tee};
pub use timestamp::{TimestampFormat, DEFAULT_LAYOUT};
