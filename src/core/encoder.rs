//! Entry encoders
//!
//! An [`Encoder`] turns a [`LogEntry`] plus the fields attached to its core
//! into a single output line. Three encoders are provided:
//! - [`JsonEncoder`]: one JSON object per line
//! - [`TextEncoder`]: human-readable, optionally coloured
//! - [`LogfmtEncoder`]: `key=value` pairs

use super::error::{LoggerError, Result};
use super::field::{Field, FieldValue};
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How `FieldValue::Duration` is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationEncoding {
    /// Human-readable string: `1s`, `1.5ms`
    #[default]
    String,
    /// Floating-point seconds
    Seconds,
    /// Integer milliseconds
    Millis,
    /// Integer nanoseconds
    Nanos,
}

/// Key names and value renderings shared by all encoders
///
/// An empty `level_key`, `time_key` or `thread_key` omits that column.
/// `message_key` must not be empty. A field whose key matches one of the
/// non-empty column keys is written as `fields.<key>` so it never replaces
/// the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub message_key: String,
    pub level_key: String,
    pub time_key: String,
    pub thread_key: String,
    pub timestamp_format: TimestampFormat,
    pub duration_encoding: DurationEncoding,
    pub colors: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            message_key: "message".to_string(),
            level_key: "level".to_string(),
            time_key: "timestamp".to_string(),
            thread_key: String::new(),
            timestamp_format: TimestampFormat::default(),
            duration_encoding: DurationEncoding::default(),
            colors: false,
        }
    }
}

impl EncoderConfig {
    /// A config that writes only the message and fields
    pub fn message_only(message_key: impl Into<String>) -> Self {
        Self {
            message_key: message_key.into(),
            level_key: String::new(),
            time_key: String::new(),
            thread_key: String::new(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_duration_encoding(mut self, encoding: DurationEncoding) -> Self {
        self.duration_encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.message_key.is_empty() {
            return Err(LoggerError::config(
                "EncoderConfig",
                "message_key must not be empty",
            ));
        }
        self.timestamp_format.validate()
    }

    fn is_reserved(&self, key: &str) -> bool {
        [
            &self.message_key,
            &self.level_key,
            &self.time_key,
            &self.thread_key,
        ]
        .iter()
        .any(|reserved| !reserved.is_empty() && reserved.as_str() == key)
    }

    /// Output key for a field, moved under `fields.` if it collides with a column
    pub fn field_key<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.is_reserved(key) {
            Cow::Owned(format!("fields.{}", key))
        } else {
            Cow::Borrowed(key)
        }
    }

    /// JSON rendering of a field value
    pub fn json_value(&self, value: &FieldValue) -> serde_json::Value {
        match value {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => (*i).into(),
            FieldValue::Uint(u) => (*u).into(),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Duration(d) => match self.duration_encoding {
                DurationEncoding::String => serde_json::Value::String(format!("{:?}", d)),
                DurationEncoding::Seconds => serde_json::Number::from_f64(d.as_secs_f64())
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
                DurationEncoding::Millis => saturating_u64(d.as_millis()).into(),
                DurationEncoding::Nanos => saturating_u64(d.as_nanos()).into(),
            },
            FieldValue::Null => serde_json::Value::Null,
        }
    }

    /// Plain-text rendering of a field value
    pub fn text_value(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::Duration(d) => match self.duration_encoding {
                DurationEncoding::String => format!("{:?}", d),
                DurationEncoding::Seconds => d.as_secs_f64().to_string(),
                DurationEncoding::Millis => d.as_millis().to_string(),
                DurationEncoding::Nanos => d.as_nanos().to_string(),
            },
            other => other.to_string(),
        }
    }
}

fn saturating_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Escape newlines, carriage returns and tabs so one entry stays on one line
fn escape_control(value: &str) -> Cow<'_, str> {
    if !value.contains(['\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t"),
    )
}

/// Turns one entry into one output line (without trailing newline)
pub trait Encoder: Send + Sync + fmt::Debug {
    /// Encode `entry`; `attached` fields precede the entry's own fields
    fn encode(&self, entry: &LogEntry, attached: &[Field]) -> Result<String>;

    fn config(&self) -> &EncoderConfig;
}

#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, entry: &LogEntry, attached: &[Field]) -> Result<String> {
        let config = &self.config;
        let mut json_obj = serde_json::Map::new();

        if !config.time_key.is_empty() {
            json_obj.insert(
                config.time_key.clone(),
                config.timestamp_format.format_json(&entry.timestamp),
            );
        }
        if !config.level_key.is_empty() {
            json_obj.insert(
                config.level_key.clone(),
                serde_json::Value::String(entry.level.as_lowercase().to_string()),
            );
        }
        if !config.thread_key.is_empty() {
            let thread = entry.thread_name.as_ref().unwrap_or(&entry.thread_id);
            json_obj.insert(
                config.thread_key.clone(),
                serde_json::Value::String(thread.clone()),
            );
        }
        json_obj.insert(
            config.message_key.clone(),
            serde_json::Value::String(entry.message.clone()),
        );

        for field in attached.iter().chain(entry.fields.iter()) {
            json_obj.insert(
                config.field_key(&field.key).into_owned(),
                config.json_value(&field.value),
            );
        }

        Ok(serde_json::to_string(&serde_json::Value::Object(json_obj))?)
    }

    fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextEncoder {
    config: EncoderConfig,
}

impl TextEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    fn level_column(&self, entry: &LogEntry) -> String {
        paint_level(entry, format!("{:5}", entry.level.to_str()), self.config.colors)
    }
}

#[cfg(feature = "console")]
fn paint_level(entry: &LogEntry, text: String, colors: bool) -> String {
    use colored::Colorize;
    if colors {
        text.color(entry.level.color_code()).to_string()
    } else {
        text
    }
}

#[cfg(not(feature = "console"))]
fn paint_level(_entry: &LogEntry, text: String, _colors: bool) -> String {
    text
}

impl Encoder for TextEncoder {
    fn encode(&self, entry: &LogEntry, attached: &[Field]) -> Result<String> {
        let config = &self.config;
        let mut parts = Vec::new();

        if !config.time_key.is_empty() {
            parts.push(format!("[{}]", config.timestamp_format.format(&entry.timestamp)));
        }
        if !config.level_key.is_empty() {
            parts.push(format!("[{}]", self.level_column(entry)));
        }
        if !config.thread_key.is_empty() {
            let thread = entry.thread_name.as_ref().unwrap_or(&entry.thread_id);
            parts.push(format!("{} -", thread));
        }
        parts.push(escape_control(&entry.message).into_owned());

        for field in attached.iter().chain(entry.fields.iter()) {
            parts.push(format!(
                "{}={}",
                escape_control(&field.key),
                escape_control(&config.text_value(&field.value))
            ));
        }

        Ok(parts.join(" "))
    }

    fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogfmtEncoder {
    config: EncoderConfig,
}

impl LogfmtEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Strip characters that are not valid in a logfmt key
    fn escape_key(key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
            .collect()
    }

    /// Quote a logfmt value if it contains whitespace, quotes or '='
    fn escape_value(value: &str) -> String {
        if value.is_empty() || value.contains([' ', '"', '=', '\n', '\r', '\t']) {
            Self::quote_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_value(value: &str) -> String {
        let quoted = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escape_control(&quoted))
    }
}

impl Encoder for LogfmtEncoder {
    fn encode(&self, entry: &LogEntry, attached: &[Field]) -> Result<String> {
        let config = &self.config;
        let mut parts = Vec::new();

        if !config.time_key.is_empty() {
            parts.push(format!(
                "{}={}",
                Self::escape_key(&config.time_key),
                Self::escape_value(&config.timestamp_format.format(&entry.timestamp))
            ));
        }
        if !config.level_key.is_empty() {
            parts.push(format!(
                "{}={}",
                Self::escape_key(&config.level_key),
                entry.level.as_lowercase()
            ));
        }
        if !config.thread_key.is_empty() {
            let thread = entry.thread_name.as_ref().unwrap_or(&entry.thread_id);
            parts.push(format!(
                "{}={}",
                Self::escape_key(&config.thread_key),
                Self::escape_value(thread)
            ));
        }
        // The message is always quoted
        parts.push(format!(
            "{}={}",
            Self::escape_key(&config.message_key),
            Self::quote_value(&entry.message)
        ));

        for field in attached.iter().chain(entry.fields.iter()) {
            let value = match &field.value {
                FieldValue::String(s) => Self::escape_value(s),
                other => Self::escape_value(&config.text_value(other)),
            };
            parts.push(format!(
                "{}={}",
                Self::escape_key(&config.field_key(&field.key)),
                value
            ));
        }

        Ok(parts.join(" "))
    }

    fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

/// Output format selector used by configuration and the builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line (default)
    #[default]
    Json,

    /// `[2025-01-08T10:30:45.123Z] [INFO ] Request processed key=value`
    Text,

    /// `timestamp=2025-01-08T10:30:45.123Z level=info message="Request processed"`
    Logfmt,
}

impl OutputFormat {
    /// Build the encoder for this format
    pub fn encoder(&self, config: EncoderConfig) -> Arc<dyn Encoder> {
        match self {
            OutputFormat::Json => Arc::new(JsonEncoder::new(config)),
            OutputFormat::Text => Arc::new(TextEncoder::new(config)),
            OutputFormat::Logfmt => Arc::new(LogfmtEncoder::new(config)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "console" => Ok(OutputFormat::Text),
            "logfmt" => Ok(OutputFormat::Logfmt),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use std::time::Duration;

    fn entry(level: LogLevel, message: &str, fields: &[Field]) -> LogEntry {
        LogEntry::new(level, message).with_fields(fields)
    }

    #[test]
    fn test_json_format() {
        let encoder = JsonEncoder::default();
        let line = encoder
            .encode(&entry(LogLevel::Error, "Error occurred", &[]), &[])
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "error");
        assert_eq!(parsed["message"], "Error occurred");
        assert!(parsed["timestamp"].is_string());
    }

    #[test]
    fn test_json_attached_fields_precede_call_site_fields() {
        let encoder = JsonEncoder::new(EncoderConfig::message_only("msg"));
        let attached = [Field::string("service", "api")];
        let line = encoder
            .encode(
                &entry(LogLevel::Info, "Request completed", &[Field::int("latency_ms", 42)]),
                &attached,
            )
            .unwrap();

        assert_eq!(
            line,
            r#"{"msg":"Request completed","service":"api","latency_ms":42}"#
        );
    }

    #[test]
    fn test_json_duration_encodings() {
        let fields = [Field::duration("d", Duration::from_millis(1500))];
        let e = entry(LogLevel::Info, "timed", &fields);

        let cases = [
            (DurationEncoding::String, serde_json::json!("1.5s")),
            (DurationEncoding::Seconds, serde_json::json!(1.5)),
            (DurationEncoding::Millis, serde_json::json!(1500)),
            (DurationEncoding::Nanos, serde_json::json!(1_500_000_000_u64)),
        ];
        for (encoding, expected) in cases {
            let encoder = JsonEncoder::new(
                EncoderConfig::message_only("message").with_duration_encoding(encoding),
            );
            let parsed: serde_json::Value =
                serde_json::from_str(&encoder.encode(&e, &[]).unwrap()).unwrap();
            assert_eq!(parsed["d"], expected, "{:?}", encoding);
        }
    }

    #[test]
    fn test_json_omits_empty_keys() {
        let encoder = JsonEncoder::new(EncoderConfig::message_only("message"));
        let line = encoder.encode(&entry(LogLevel::Warn, "hi", &[]), &[]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(parsed.get("level").is_none());
        assert!(parsed.get("timestamp").is_none());
    }

    #[test]
    fn test_text_format() {
        let encoder = TextEncoder::default();
        let line = encoder
            .encode(
                &entry(LogLevel::Info, "User logged in", &[Field::int("user_id", 123)]),
                &[Field::string("action", "login")],
            )
            .unwrap();

        assert!(line.contains("INFO"));
        assert!(line.contains("User logged in"));
        assert!(line.ends_with("action=login user_id=123"));
    }

    #[test]
    fn test_logfmt_format() {
        let encoder = LogfmtEncoder::default();
        let line = encoder
            .encode(
                &entry(
                    LogLevel::Debug,
                    "Query executed",
                    &[Field::string("query", "SELECT * FROM users WHERE id=1")],
                ),
                &[],
            )
            .unwrap();

        assert!(line.contains("level=debug"));
        assert!(line.contains("message=\"Query executed\""));
        assert!(line.contains("query=\"SELECT * FROM users WHERE id=1\""));
    }

    #[test]
    fn test_json_keeps_exact_message_text() {
        let message = "line one\nline two\ttab";
        let line = JsonEncoder::default()
            .encode(&entry(LogLevel::Debug, message, &[]), &[])
            .unwrap();

        assert!(!line.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], message);
    }

    #[test]
    fn test_line_encoders_escape_control_characters() {
        let e = entry(
            LogLevel::Info,
            "first\nERROR: forged\r",
            &[Field::string("note", "a\tb\nc")],
        );
        let encoders: [Box<dyn Encoder>; 2] =
            [Box::new(TextEncoder::default()), Box::new(LogfmtEncoder::default())];

        for encoder in &encoders {
            let line = encoder.encode(&e, &[]).unwrap();
            assert!(!line.contains(['\n', '\r', '\t']), "{:?}: {}", encoder, line);
            assert!(line.contains("first\\nERROR: forged\\r"), "{:?}: {}", encoder, line);
            assert!(line.contains("a\\tb\\nc"), "{:?}: {}", encoder, line);
        }
    }

    #[test]
    fn test_json_field_cannot_replace_message() {
        let line = JsonEncoder::new(EncoderConfig::message_only("message"))
            .encode(
                &entry(LogLevel::Error, "real message", &[Field::string("message", "user field")]),
                &[],
            )
            .unwrap();

        assert_eq!(
            line,
            r#"{"message":"real message","fields.message":"user field"}"#
        );
    }

    #[test]
    fn test_reserved_keys_protected_in_json_and_logfmt() {
        let fields = [
            Field::string("level", "spoofed"),
            Field::string("timestamp", "yesterday"),
            Field::string("thread", "t"),
        ];
        let e = entry(LogLevel::Warn, "hi", &fields);

        let json = JsonEncoder::default().encode(&e, &[]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["fields.level"], "spoofed");
        assert!(parsed["timestamp"].is_string());
        assert_eq!(parsed["fields.timestamp"], "yesterday");
        // thread_key is empty by default, so "thread" is an ordinary field
        assert_eq!(parsed["thread"], "t");

        let logfmt = LogfmtEncoder::default().encode(&e, &[]).unwrap();
        assert!(logfmt.contains("level=warn"));
        assert!(logfmt.contains("fields.level=spoofed"));
    }

    #[test]
    fn test_validate_rejects_invalid_timestamp_format() {
        let config = EncoderConfig::default()
            .with_timestamp_format(TimestampFormat::Custom("%Q".to_string()));
        assert!(matches!(
            config.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_message_key() {
        let config = EncoderConfig::message_only("");
        assert!(matches!(
            config.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("console".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
