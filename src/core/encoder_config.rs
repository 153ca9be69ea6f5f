//! Encoder configuration: output keys, separators and the per-part encoders
//!
//! A single [`EncoderConfig`] drives both the JSON and the console encoder.

use super::log_entry::Caller;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Level flags accepted by [`LevelFormat::from_flags`]
pub const LF_NONE: u8 = 0;
pub const LF_CAPITAL: u8 = 1 << 1;
pub const LF_COLOR: u8 = 1 << 2;

/// Caller flags accepted by [`CallerFormat::from_flags`]
pub const CS_NONE: u8 = 0;
pub const CS_FULL: u8 = 1 << 1;

/// How the level of an entry is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelFormat {
    /// Level is left out of the output
    None,
    Lowercase,
    LowercaseColor,
    Capital,
    #[default]
    CapitalColor,
}

impl LevelFormat {
    /// Map `LF_*` flags to a format
    ///
    /// ```
    /// use looog::{LevelFormat, LF_CAPITAL, LF_COLOR, LF_NONE};
    ///
    /// assert_eq!(LevelFormat::from_flags(LF_NONE), LevelFormat::None);
    /// assert_eq!(LevelFormat::from_flags(LF_CAPITAL | LF_COLOR), LevelFormat::CapitalColor);
    /// assert_eq!(LevelFormat::from_flags(LF_COLOR), LevelFormat::LowercaseColor);
    /// ```
    pub fn from_flags(flags: u8) -> Self {
        let capital = flags & LF_CAPITAL == LF_CAPITAL;
        let color = flags & LF_COLOR == LF_COLOR;
        match (flags, capital, color) {
            (LF_NONE, _, _) => LevelFormat::None,
            (_, true, true) => LevelFormat::CapitalColor,
            (_, true, false) => LevelFormat::Capital,
            (_, false, true) => LevelFormat::LowercaseColor,
            _ => LevelFormat::Lowercase,
        }
    }

    /// Render `level`, or `None` when the level is omitted
    pub fn render(&self, level: LogLevel) -> Option<String> {
        match self {
            LevelFormat::None => None,
            LevelFormat::Lowercase => Some(level.to_lowercase_str().to_string()),
            LevelFormat::Capital => Some(level.to_str().to_string()),
            LevelFormat::LowercaseColor => Some(
                level
                    .to_lowercase_str()
                    .color(level.color_code())
                    .to_string(),
            ),
            LevelFormat::CapitalColor => {
                Some(level.to_str().color(level.color_code()).to_string())
            }
        }
    }

    /// Same format without ANSI colour, for machine-readable output
    pub fn without_color(&self) -> Self {
        match self {
            LevelFormat::LowercaseColor => LevelFormat::Lowercase,
            LevelFormat::CapitalColor => LevelFormat::Capital,
            other => *other,
        }
    }
}

/// How the caller location is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerFormat {
    /// Caller is left out of the output
    None,
    /// `dir/file.rs:line`
    #[default]
    Short,
    /// Full source path and line
    Full,
}

impl CallerFormat {
    /// Map `CS_*` flags to a format; no flags selects the short form
    ///
    /// `CS_NONE` does not suppress the caller. Use [`CallerFormat::None`] or
    /// disable caller annotation on the logger to omit it.
    pub fn from_flags(flags: u8) -> Self {
        if flags & CS_FULL == CS_FULL {
            CallerFormat::Full
        } else {
            CallerFormat::Short
        }
    }

    pub fn render(&self, caller: &Caller) -> Option<String> {
        match self {
            CallerFormat::None => None,
            CallerFormat::Short => Some(caller.short()),
            CallerFormat::Full => Some(caller.full()),
        }
    }
}

/// How `Duration` field values are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationFormat {
    /// Floating-point milliseconds
    #[default]
    Millis,
    /// Floating-point seconds
    Seconds,
    /// Integer nanoseconds
    Nanos,
    /// Debug form, e.g. `1.5s`
    String,
}

impl DurationFormat {
    pub fn encode(&self, d: &Duration) -> serde_json::Value {
        match self {
            DurationFormat::Millis => serde_json::json!(d.as_secs_f64() * 1000.0),
            DurationFormat::Seconds => serde_json::json!(d.as_secs_f64()),
            DurationFormat::Nanos => {
                serde_json::json!(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            }
            DurationFormat::String => serde_json::Value::String(format!("{:?}", d)),
        }
    }
}

/// Keys, separators and part encoders shared by every encoder
///
/// # Examples
///
/// ```
/// use looog::{EncoderConfig, LevelFormat, TimestampFormat};
///
/// let config = EncoderConfig::new()
///     .with_time_format(TimestampFormat::Rfc3339)
///     .with_level_format(LevelFormat::Capital)
///     .with_message_key("message");
/// assert_eq!(config.level_key, "Level");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    /// Reserved; stack traces are not captured
    pub stacktrace_key: String,
    pub console_separator: String,
    pub line_ending: String,
    pub time_format: TimestampFormat,
    pub level_format: LevelFormat,
    pub caller_format: CallerFormat,
    pub duration_format: DurationFormat,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "time".to_string(),
            level_key: "Level".to_string(),
            name_key: "logger".to_string(),
            caller_key: "file".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            console_separator: "\t".to_string(),
            line_ending: "\n".to_string(),
            time_format: TimestampFormat::default(),
            level_format: LevelFormat::default(),
            caller_format: CallerFormat::default(),
            duration_format: DurationFormat::default(),
        }
    }
}

impl EncoderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_time_key(mut self, key: impl Into<String>) -> Self {
        self.time_key = key.into();
        self
    }

    #[must_use]
    pub fn with_level_key(mut self, key: impl Into<String>) -> Self {
        self.level_key = key.into();
        self
    }

    #[must_use]
    pub fn with_name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = key.into();
        self
    }

    #[must_use]
    pub fn with_caller_key(mut self, key: impl Into<String>) -> Self {
        self.caller_key = key.into();
        self
    }

    #[must_use]
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }

    #[must_use]
    pub fn with_console_separator(mut self, separator: impl Into<String>) -> Self {
        self.console_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }

    #[must_use]
    pub fn with_time_format(mut self, format: TimestampFormat) -> Self {
        self.time_format = format;
        self
    }

    #[must_use]
    pub fn with_level_format(mut self, format: LevelFormat) -> Self {
        self.level_format = format;
        self
    }

    #[must_use]
    pub fn with_caller_format(mut self, format: CallerFormat) -> Self {
        self.caller_format = format;
        self
    }

    #[must_use]
    pub fn with_duration_format(mut self, format: DurationFormat) -> Self {
        self.duration_format = format;
        self
    }
}
