//! Encoder trait and style selection

use super::encoder_config::EncoderConfig;
use super::error::Result;
use super::log_entry::LogEntry;
use crate::encoders::{ConsoleEncoder, JsonEncoder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Turns a log entry into the bytes written to a sink, line ending included
pub trait Encoder: Send + Sync {
    fn encode(&self, entry: &LogEntry) -> Result<Vec<u8>>;
    fn name(&self) -> &str;
}

/// Output style of a core
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Json,
    #[default]
    Console,
}

impl Style {
    /// Build the encoder for this style
    pub fn encoder(&self, config: EncoderConfig) -> Box<dyn Encoder> {
        match self {
            Style::Json => Box::new(JsonEncoder::new(config)),
            Style::Console => Box::new(ConsoleEncoder::new(config)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Json => "json",
            Style::Console => "console",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly `json` selects the JSON style; anything else, including `JSON`
/// or a padded ` json`, selects the console style
impl FromStr for Style {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "json" {
            Ok(Style::Json)
        } else {
            Ok(Style::Console)
        }
    }
}

impl From<&str> for Style {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(style) => style,
            Err(never) => match never {},
        }
    }
}
