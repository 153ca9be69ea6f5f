//! JSON encoder for structured logging
//!
//! Writes each entry as a single-line JSON object (JSONL), compatible with
//! log aggregation tools like ELK or Loki.

use crate::core::{Encoder, EncoderConfig, LogEntry, Result};
use serde_json::{Map, Value};

pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Build the JSON object for `entry`, keys in output order
    pub fn to_object(&self, entry: &LogEntry) -> Map<String, Value> {
        let config = &self.config;
        let mut obj = Map::new();

        if !config.time_key.is_empty() {
            obj.insert(
                config.time_key.clone(),
                config.time_format.to_json_value(&entry.timestamp),
            );
        }

        // ANSI colour codes never belong inside JSON strings
        if !config.level_key.is_empty() {
            if let Some(level) = config.level_format.without_color().render(entry.level) {
                obj.insert(config.level_key.clone(), Value::String(level));
            }
        }

        if let (false, Some(name)) = (config.name_key.is_empty(), &entry.logger_name) {
            obj.insert(config.name_key.clone(), Value::String(name.clone()));
        }

        if let (false, Some(caller)) = (config.caller_key.is_empty(), &entry.caller) {
            if let Some(rendered) = config.caller_format.render(caller) {
                obj.insert(config.caller_key.clone(), Value::String(rendered));
            }
        }

        if !config.message_key.is_empty() {
            obj.insert(
                config.message_key.clone(),
                Value::String(entry.message.clone()),
            );
        }

        for (key, value) in entry.fields.iter() {
            obj.insert(key.to_string(), value.to_json_value(config.duration_format));
        }

        obj
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        let mut buf = serde_json::to_vec(&Value::Object(self.to_object(entry)))?;
        buf.extend_from_slice(self.config.line_ending.as_bytes());
        Ok(buf)
    }

    fn name(&self) -> &str {
        "json"
    }
}
