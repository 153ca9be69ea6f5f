//! Log entry structure

use super::fields::Fields;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;

/// Source location of the logging call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub file: String,
    pub line: u32,
}

impl Caller {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }

    /// `dir/file.rs:line`, keeping only the last directory of the path
    pub fn short(&self) -> String {
        let is_sep = |c: char| c == '/' || c == '\\';
        let trimmed = match self.file.rfind(is_sep) {
            Some(last) => match self.file[..last].rfind(is_sep) {
                Some(prev) => &self.file[prev + 1..],
                None => self.file.as_str(),
            },
            None => self.file.as_str(),
        };
        format!("{}:{}", trimmed, self.line)
    }

    /// Full path and line
    pub fn full(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<Caller>,
    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    pub fields: Fields,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one call always produces exactly one output line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            logger_name: None,
            caller: None,
            fields: Fields::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = Some(name.into());
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }
}
