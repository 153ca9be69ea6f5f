//! Timestamp formatting utilities
//!
//! Provides the time encoders used by [`EncoderConfig`](super::EncoderConfig).
//! Supports ISO 8601, RFC 3339, Unix timestamps, and strftime layouts.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Layout used by the console and JSON encoders unless overridden
pub const DEFAULT_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use looog::TimestampFormat;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&chrono::Utc::now());
/// // Output: "2025-01-08T10:30:45.123Z"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// strftime layout, `%Y-%m-%d %H:%M:%S` unless overridden
    ///
    /// # Examples
    ///
    /// ```
    /// use looog::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Layout("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Layout(String),
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::Layout(DEFAULT_LAYOUT.to_string())
    }
}

impl TimestampFormat {
    /// Build a layout format, rejecting strings chrono cannot format
    ///
    /// ```
    /// use looog::TimestampFormat;
    ///
    /// assert!(TimestampFormat::layout("%H:%M").is_ok());
    /// assert!(TimestampFormat::layout("%Q").is_err());
    /// ```
    pub fn layout(layout: impl Into<String>) -> Result<Self> {
        let layout = layout.into();
        if StrftimeItems::new(&layout).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "TimestampFormat",
                format!("invalid strftime layout '{}'", layout),
            ));
        }
        Ok(TimestampFormat::Layout(layout))
    }

    /// Format a `DateTime<Utc>` according to this format
    ///
    /// A layout chrono cannot render falls back to ISO 8601 instead of
    /// failing the log call.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Layout(layout) => {
                let mut out = String::new();
                if write!(out, "{}", datetime.format(layout)).is_err() {
                    return TimestampFormat::Iso8601.format(datetime);
                }
                out
            }
        }
    }

    /// JSON form of the timestamp: numbers for Unix formats, strings otherwise
    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => serde_json::Value::Number(datetime.timestamp().into()),
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(datetime.timestamp_millis().into())
            }
            TimestampFormat::UnixMicros => {
                serde_json::Value::Number(datetime.timestamp_micros().into())
            }
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }
}
