//! Single-core configuration
//!
//! [`LogConfig`] collects a style, a minimum level, an output sink and the
//! encoder settings, and is consumed by [`LogConfig::build`] to produce one
//! [`Core`]. Several cores are combined with a [`Tee`](super::Tee).

use super::{
    encoder::Style,
    encoder_config::{CallerFormat, EncoderConfig, LevelFormat},
    error::Result,
    log_level::LogLevel,
    sink::Sink,
    tee::Core,
    timestamp::TimestampFormat,
};
use crate::sinks::{FileSink, StdoutSink};
use std::path::Path;

/// Builder for one [`Core`]
///
/// # Example
///
/// ```
/// use looog::sinks::SharedBuffer;
/// use looog::{LogConfig, LogLevel, Style, TimestampFormat};
///
/// let core = LogConfig::new()
///     .style(Style::Json)
///     .level(LogLevel::Warn)
///     .output(SharedBuffer::new())
///     .time_key("ts")
///     .time_format(TimestampFormat::UnixMillis)
///     .build();
/// assert!(!core.enabled(LogLevel::Info));
/// ```
pub struct LogConfig {
    style: Style,
    level: LogLevel,
    output: Option<Box<dyn Sink>>,
    encoder: EncoderConfig,
}

impl LogConfig {
    /// Console style, `Debug` level, stdout, default encoder settings
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            level: LogLevel::default(),
            output: None,
            encoder: EncoderConfig::default(),
        }
    }

    /// Set the style; strings other than `json` select the console style
    #[must_use = "builder methods return a new value"]
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.style = style.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.output = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.output = Some(sink);
        self
    }

    /// Append to the file at `path`
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::FileSinkError`](super::LoggerError::FileSinkError)
    /// if the file cannot be opened.
    pub fn output_file(self, path: impl AsRef<Path>) -> Result<Self> {
        Ok(self.output(FileSink::open(path)?))
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_key(mut self, key: impl Into<String>) -> Self {
        self.encoder.time_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimestampFormat) -> Self {
        self.encoder.time_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_key(mut self, key: impl Into<String>) -> Self {
        self.encoder.level_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_format(mut self, format: LevelFormat) -> Self {
        self.encoder.level_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_key(mut self, key: impl Into<String>) -> Self {
        self.encoder.caller_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_format(mut self, format: CallerFormat) -> Self {
        self.encoder.caller_format = format;
        self
    }

    /// Replace every encoder setting at once
    #[must_use = "builder methods return a new value"]
    pub fn encoder_config(mut self, config: EncoderConfig) -> Self {
        self.encoder = config;
        self
    }

    pub fn encoder(&self) -> &EncoderConfig {
        &self.encoder
    }

    pub fn get_style(&self) -> Style {
        self.style
    }

    pub fn get_level(&self) -> LogLevel {
        self.level
    }

    /// Consume the configuration into a core
    pub fn build(self) -> Core {
        let sink: Box<dyn Sink> = match self.output {
            Some(sink) => sink,
            None => Box::new(StdoutSink::new()),
        };
        Core::from_boxed(self.style.encoder(self.encoder), sink, self.level)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogEntry;
    use crate::sinks::SharedBuffer;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.get_style(), Style::Console);
        assert_eq!(config.get_level(), LogLevel::Debug);

        let core = config.build();
        assert_eq!(core.encoder_name(), "console");
        assert_eq!(core.sink_name(), "stdout");
    }

    #[test]
    fn test_json_core_with_custom_keys() {
        let buffer = SharedBuffer::new();
        let core = LogConfig::new()
            .style("json")
            .level(LogLevel::Info)
            .output(buffer.clone())
            .time_key("ts")
            .time_format(TimestampFormat::Unix)
            .level_key("severity")
            .level_format(LevelFormat::Lowercase)
            .build();

        core.write(&LogEntry::new(LogLevel::Warn, "cache miss")).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert!(parsed["ts"].is_i64());
        assert_eq!(parsed["severity"], "warn");
        assert_eq!(parsed["msg"], "cache miss");
    }

    #[test]
    fn test_unknown_style_falls_back_to_console() {
        let core = LogConfig::new().style("xml").output(SharedBuffer::new()).build();
        assert_eq!(core.encoder_name(), "console");
    }

    #[test]
    fn test_output_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("core.log");

        let core = LogConfig::new()
            .level_format(LevelFormat::Capital)
            .output_file(&path)?
            .build();
        core.write(&LogEntry::new(LogLevel::Error, "written to file"))?;
        core.sync()?;

        let content = fs::read_to_string(&path)?;
        assert!(content.contains("ERROR\twritten to file"));
        Ok(())
    }

    #[test]
    fn test_output_file_error() {
        let dir = tempdir().unwrap();
        let result = LogConfig::new().output_file(dir.path().join("no/such/dir.log"));
        assert!(result.is_err());
    }
}
