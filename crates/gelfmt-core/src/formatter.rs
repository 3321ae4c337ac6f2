//! GELF formatter.
//!
//! Maps a [`LogRecord`] onto a GELF 1.1 payload
//! (<https://go2docs.graylog.org/current/getting_in_log_data/gelf.html>).
//!
//! | Key | Source |
//! |-----|--------|
//! | `version` | always `"1.1"` |
//! | `host` | record host, else the formatter host |
//! | `short_message` | record message |
//! | `timestamp` | record creation instant, float seconds |
//! | `level` | syslog severity of the record level |
//! | `_logger_name` / `_levelname` | record logger name / level name |
//! | `full_message` | rendered exception, when present |
//! | `_<field>` | one per enabled [`ExtraField`] with a non-empty value |
//!
//! Formatting never fails. Missing optional attributes are left out.

use serde_json::{Map, Value};

use crate::config::GelfConfig;
use crate::fields::{ExtraField, FieldSet, Profile};
use crate::severity::SyslogSeverity;
use crate::types::LogRecord;

pub const GELF_VERSION: &str = "1.1";

/// Keys present in every GELF object this formatter produces.
pub const MANDATORY_KEYS: [&str; 7] = [
    "version",
    "host",
    "short_message",
    "timestamp",
    "level",
    "_logger_name",
    "_levelname",
];

#[derive(Debug, Clone, PartialEq)]
pub struct GelfFormatter {
    fields: FieldSet,
    host: String,
    null_terminated: bool,
}

impl GelfFormatter {
    pub fn new(fields: impl Into<FieldSet>) -> Self {
        Self {
            fields: fields.into(),
            host: crate::config::system_hostname(),
            null_terminated: false,
        }
    }

    pub fn from_profile(profile: Profile) -> Self {
        Self::new(profile)
    }

    pub fn from_config(config: &GelfConfig) -> Self {
        Self {
            fields: config.field_set(),
            host: config.resolve_host(),
            null_terminated: config.null_terminated,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Terminate every message with `\0`, the GELF TCP frame delimiter.
    pub fn null_terminated(mut self, enabled: bool) -> Self {
        self.null_terminated = enabled;
        self
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_null_terminated(&self) -> bool {
        self.null_terminated
    }

    /// Build the GELF object with the formatter's own field set.
    pub fn gelf_fields(&self, record: &LogRecord) -> Map<String, Value> {
        self.gelf_fields_with(record, &self.fields)
    }

    /// Build the GELF object with a per-call field set.
    pub fn gelf_fields_with(&self, record: &LogRecord, fields: &FieldSet) -> Map<String, Value> {
        let mut out = Map::new();
        out.insert("version".into(), GELF_VERSION.into());
        out.insert(
            "host".into(),
            record.host.as_deref().unwrap_or(&self.host).into(),
        );
        out.insert("short_message".into(), record.message.as_str().into());
        out.insert("timestamp".into(), epoch_seconds(record).into());
        out.insert(
            "level".into(),
            SyslogSeverity::from_level(record.level).code().into(),
        );
        out.insert("_logger_name".into(), record.name.as_str().into());
        out.insert("_levelname".into(), record.level.name().into_owned().into());

        if let Some(exception) = record.exc_info.as_deref().filter(|e| !e.is_empty()) {
            out.insert("full_message".into(), exception.into());
        }

        for field in fields.iter() {
            if let Some(value) = field_value(record, field).filter(is_present) {
                out.insert(field.gelf_key(), value);
            }
        }
        out
    }

    /// Render the record as a GELF JSON string.
    pub fn format(&self, record: &LogRecord) -> String {
        self.format_with(record, &self.fields)
    }

    pub fn format_with(&self, record: &LogRecord, fields: &FieldSet) -> String {
        let mut out = Value::Object(self.gelf_fields_with(record, fields)).to_string();
        if self.null_terminated {
            out.push('\0');
        }
        out
    }
}

impl Default for GelfFormatter {
    fn default() -> Self {
        Self::from_profile(Profile::Basic)
    }
}

fn epoch_seconds(record: &LogRecord) -> f64 {
    record.created.timestamp() as f64 + f64::from(record.created.timestamp_subsec_micros()) / 1e6
}

/// Where each optional field reads its value from. An attached request
/// replaces the `scheme`/`method` attributes, and a request user replaces
/// `user_id`/`username`, even when the request side is empty.
fn field_value(record: &LogRecord, field: ExtraField) -> Option<Value> {
    let attribute = || record.attributes.get(field.as_str()).cloned();
    let request = record.request.as_ref();
    let user = request.and_then(|r| r.user.as_ref());

    match field {
        ExtraField::Line => record.lineno.map(Value::from),
        ExtraField::File => record.pathname.as_deref().map(Value::from),
        ExtraField::ExcText => record.exc_text.as_deref().map(Value::from),
        ExtraField::Scheme => match request {
            Some(request) => request.scheme.as_deref().map(Value::from),
            None => attribute(),
        },
        ExtraField::Method => match request {
            Some(request) => request.method.as_deref().map(Value::from),
            None => attribute(),
        },
        ExtraField::UserId => match user {
            Some(user) => user.id.clone(),
            None => attribute(),
        },
        ExtraField::Username => match user {
            Some(user) => user.username.as_deref().map(Value::from),
            None => attribute(),
        },
        _ => attribute(),
    }
}

/// Empty strings, zero, `false`, `null` and empty containers count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
