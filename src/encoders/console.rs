//! Human-readable console encoder

use crate::core::{Encoder, EncoderConfig, LogEntry, Result};
use serde_json::Value;

/// Separator-joined text lines: time, level, name, caller, message, fields
///
/// Fields are appended as one compact JSON object so values containing the
/// separator stay unambiguous.
pub struct ConsoleEncoder {
    config: EncoderConfig,
}

impl ConsoleEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn format_line(&self, entry: &LogEntry) -> Result<String> {
        let config = &self.config;
        let mut parts: Vec<String> = Vec::with_capacity(6);

        if !config.time_key.is_empty() {
            parts.push(config.time_format.format(&entry.timestamp));
        }

        if !config.level_key.is_empty() {
            if let Some(level) = config.level_format.render(entry.level) {
                parts.push(level);
            }
        }

        if let (false, Some(name)) = (config.name_key.is_empty(), &entry.logger_name) {
            parts.push(name.clone());
        }

        if let (false, Some(caller)) = (config.caller_key.is_empty(), &entry.caller) {
            if let Some(rendered) = config.caller_format.render(caller) {
                parts.push(rendered);
            }
        }

        if !config.message_key.is_empty() {
            parts.push(entry.message.clone());
        }

        if !entry.fields.is_empty() {
            let obj: serde_json::Map<String, Value> = entry
                .fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_json_value(config.duration_format)))
                .collect();
            parts.push(serde_json::to_string(&Value::Object(obj))?);
        }

        Ok(parts.join(&config.console_separator))
    }
}

impl Encoder for ConsoleEncoder {
    fn encode(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        let mut line = self.format_line(entry)?;
        line.push_str(&self.config.line_ending);
        Ok(line.into_bytes())
    }

    fn name(&self) -> &str {
        "console"
    }
}
