//! Field collection for events and spans.

use std::collections::BTreeMap;
use std::fmt;

use gelfmt_core::{Level, LogRecord};
use serde_json::Value;
use tracing::field::{Field, Visit};

/// Fields recorded on a span, kept in its extensions.
#[derive(Debug, Default)]
pub(crate) struct SpanFields(pub(crate) BTreeMap<&'static str, Value>);

/// Collects typed field values into a map.
pub(crate) struct FieldCollector<'a>(pub(crate) &'a mut BTreeMap<&'static str, Value>);

impl Visit for FieldCollector<'_> {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.0.insert(field.name(), Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name(), Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name(), Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.0.insert(field.name(), Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name(), Value::from(format!("{value:?}")));
    }
}

fn into_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Route one collected field to its place on the record.
pub(crate) fn apply_field(record: &mut LogRecord, name: &str, value: Value) {
    match name {
        "message" => record.message = into_text(value),
        "exception" => record.exc_info = Some(into_text(value)),
        "exc_text" => record.exc_text = Some(into_text(value)),
        "host" => record.host = Some(into_text(value)),
        _ => {
            record.attributes.insert(name.to_string(), value);
        }
    }
}

pub fn level_from_tracing(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::ERROR => Level::ERROR,
        tracing::Level::WARN => Level::WARNING,
        tracing::Level::INFO => Level::INFO,
        tracing::Level::DEBUG | tracing::Level::TRACE => Level::DEBUG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reserved_names_fill_record_fields() {
        let mut record = LogRecord::new("t", Level::INFO, "");
        apply_field(&mut record, "message", json!("hello"));
        apply_field(&mut record, "exception", json!("boom"));
        apply_field(&mut record, "host", json!("web-2"));
        apply_field(&mut record, "status_code", json!(404));

        assert_eq!(record.message, "hello");
        assert_eq!(record.exc_info.as_deref(), Some("boom"));
        assert_eq!(record.host.as_deref(), Some("web-2"));
        assert_eq!(record.attributes.get("status_code"), Some(&json!(404)));
        assert!(!record.attributes.contains_key("message"));
    }

    #[test]
    fn non_string_message_is_stringified() {
        let mut record = LogRecord::new("t", Level::INFO, "");
        apply_field(&mut record, "message", json!(42));
        assert_eq!(record.message, "42");
    }

    #[test]
    fn trace_folds_into_debug() {
        assert_eq!(level_from_tracing(&tracing::Level::TRACE), Level::DEBUG);
        assert_eq!(level_from_tracing(&tracing::Level::WARN), Level::WARNING);
    }
}
