//! Serializable logger configuration
//!
//! Lets applications describe their logger in a config file instead of code.
//!
//! ```
//! use looog::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "style": "json",
//!     "level": "warn",
//!     "output": "stderr",
//!     "time_format": "UnixMillis"
//! }"#).unwrap();
//! let logger = config.build().unwrap();
//! assert!(!logger.enabled(looog::LogLevel::Info));
//! ```

use super::{
    encoder::Style,
    encoder_config::{CallerFormat, LevelFormat},
    error::Result,
    log_level::LogLevel,
    logger::{Logger, LoggerBuilder},
    sink::Sink,
    timestamp::TimestampFormat,
};
use crate::sinks::{BufferedSink, FileSink, StderrSink, StdoutSink};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// `json`, anything else means console
    pub style: String,
    pub level: LogLevel,
    /// `stdout`, `stderr`, or a file path opened for appending
    pub output: String,
    pub time_format: TimestampFormat,
    pub level_format: LevelFormat,
    pub caller: bool,
    pub caller_format: CallerFormat,
    pub name: Option<String>,
    /// Queue size of a background writer in front of the output
    pub buffer_capacity: Option<usize>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            style: Style::Console.to_string(),
            level: LogLevel::Debug,
            output: "stdout".to_string(),
            time_format: TimestampFormat::default(),
            level_format: LevelFormat::CapitalColor,
            caller: true,
            caller_format: CallerFormat::Short,
            name: None,
            buffer_capacity: None,
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn open_output(&self) -> Result<Box<dyn Sink>> {
        let sink: Box<dyn Sink> = match self.output.trim() {
            "" | "stdout" => Box::new(StdoutSink::new()),
            "stderr" => Box::new(StderrSink::new()),
            path => Box::new(FileSink::open(path)?),
        };

        Ok(match self.buffer_capacity {
            Some(capacity) => Box::new(BufferedSink::new(sink, capacity)),
            None => sink,
        })
    }

    /// Builder pre-populated from this configuration
    ///
    /// # Errors
    ///
    /// Fails if the output file cannot be opened or the time layout is invalid.
    pub fn builder(&self) -> Result<LoggerBuilder> {
        let time_format = match &self.time_format {
            TimestampFormat::Layout(layout) => TimestampFormat::layout(layout.as_str())?,
            other => other.clone(),
        };

        let mut builder = Logger::builder()
            .style(self.style.as_str())
            .level(self.level)
            .output_boxed(self.open_output()?)
            .time_format(time_format)
            .level_format(self.level_format)
            .caller(self.caller, self.caller_format);

        if let Some(ref name) = self.name {
            builder = builder.name(name.clone());
        }
        Ok(builder)
    }

    pub fn build(&self) -> Result<Logger> {
        Ok(self.builder()?.build())
    }
}
