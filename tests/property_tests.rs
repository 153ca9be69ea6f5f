//! Property-based tests for looog using proptest

use looog::encoders::{ConsoleEncoder, JsonEncoder};
use looog::prelude::*;
use looog::{Caller, Encoder, LogEntry};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Panic),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        let parsed: LogLevel = level.to_lowercase_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that ordering follows the numeric severity
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 <= level2, (level1 as u8) <= (level2 as u8));
        prop_assert_eq!(level2.enabled_at(level1), level1 <= level2);
    }

    /// Test that parsing rejects anything that is not a level name
    #[test]
    fn test_log_level_invalid_parse(invalid in "[0-9xyz]{1,12}") {
        prop_assert!(invalid.parse::<LogLevel>().is_err());
    }
}

// ============================================================================
// Style Tests
// ============================================================================

proptest! {
    /// Test that every string other than "json" selects the console style
    #[test]
    fn test_style_fallback(name in "[a-z]{0,10}") {
        let style = Style::from(name.as_str());
        if name == "json" {
            prop_assert_eq!(style, Style::Json);
        } else {
            prop_assert_eq!(style, Style::Console);
        }
    }
}

// ============================================================================
// Fields Tests
// ============================================================================

proptest! {
    /// Test that fields keep insertion order and replace duplicates in place
    #[test]
    fn test_fields_order(keys in prop::collection::vec("[a-e]", 0..20)) {
        let mut fields = Fields::new();
        let mut expected: Vec<String> = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            fields.add(key.clone(), i as i64);
            if !expected.contains(key) {
                expected.push(key.clone());
            }
        }

        let actual: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        prop_assert_eq!(actual, expected.iter().map(String::as_str).collect::<Vec<_>>());

        if let Some(last) = keys.last() {
            let last_index = (keys.len() - 1) as i64;
            prop_assert_eq!(fields.get(last), Some(&FieldValue::Int(last_index)));
        }
    }
}

// ============================================================================
// Caller Tests
// ============================================================================

proptest! {
    /// Test that the short form keeps at most one directory
    #[test]
    fn test_caller_short_form(
        dirs in prop::collection::vec("[a-z]{1,8}", 0..5),
        file in "[a-z]{1,8}\\.rs",
        line in 1u32..100_000,
    ) {
        let mut parts = dirs.clone();
        parts.push(file.clone());
        let caller = Caller::new(parts.join("/"), line);

        let expected = match dirs.last() {
            Some(dir) => format!("{}/{}:{}", dir, file, line),
            None => format!("{}:{}", file, line),
        };
        prop_assert_eq!(caller.short(), expected);
        prop_assert_eq!(caller.full(), format!("{}:{}", parts.join("/"), line));
    }
}

// ============================================================================
// Encoder Safety Tests
// ============================================================================

proptest! {
    /// Test that any message encodes as exactly one valid JSON line
    #[test]
    fn test_json_encoder_single_line(
        level in any_level(),
        message in ".*",
        value in ".*",
    ) {
        let encoder = JsonEncoder::new(EncoderConfig::default());
        let entry = LogEntry::new(level, &message)
            .with_fields(Fields::new().with("value", value.clone()));

        let bytes = encoder.encode(&entry).unwrap();
        let line = String::from_utf8(bytes).unwrap();
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(parsed["value"].as_str(), Some(value.as_str()));
    }

    /// Test that console lines never contain a raw newline inside the message
    #[test]
    fn test_console_encoder_single_line(level in any_level(), message in ".*") {
        let config = EncoderConfig::default().with_level_format(LevelFormat::Capital);
        let encoder = ConsoleEncoder::new(config);
        let entry = LogEntry::new(level, &message);

        let line = String::from_utf8(encoder.encode(&entry).unwrap()).unwrap();
        prop_assert_eq!(line.matches('\n').count(), 1);
        prop_assert!(!line.contains('\r'));
        prop_assert!(line.contains(level.to_str()));
    }
}

// ============================================================================
// Logger Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Test that a core writes exactly the entries at or above its level
    #[test]
    fn test_level_filtering(
        min in any_level().prop_filter("terminating levels", |l| *l < LogLevel::Panic),
        levels in prop::collection::vec(
            prop_oneof![
                Just(LogLevel::Debug),
                Just(LogLevel::Info),
                Just(LogLevel::Warn),
                Just(LogLevel::Error),
            ],
            0..30,
        ),
    ) {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .level(min)
            .level_format(LevelFormat::Capital)
            .output(buffer.clone())
            .build();

        for level in &levels {
            logger.log(*level, "entry");
        }

        let expected = levels.iter().filter(|l| **l >= min).count();
        prop_assert_eq!(buffer.lines().len(), expected);
    }
}
