//! HTTP access events.
//!
//! An [`AccessEvent`] describes one served request. [`AccessEvent::into_record`]
//! turns it into a [`LogRecord`] whose message is an Apache combined log line
//! and whose attributes feed the [`Profile::Access`](crate::Profile::Access)
//! fields:
//!
//! | Attribute | Atom |
//! |-----------|------|
//! | `remote_addr` | `%h` |
//! | `status_code` | `%s` |
//! | `http_user_agent` | `%a` |
//! | `request_method` | `%m` |
//! | `path_info` | `%U` |
//! | `server_protocol` | `%H` |
//!
//! Atoms that are not known render as `-`, both in the message and in the
//! attributes. The status code is numeric and simply left out when unknown.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Level, LogRecord};

/// Logger name of records built from access events.
pub const ACCESS_LOGGER: &str = "access";

const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessEvent {
    #[serde(default)]
    pub remote_addr: Option<String>,
    #[serde(default)]
    pub remote_user: Option<String>,
    #[serde(default = "now", with = "crate::datetime::serde_iso8601::fixed")]
    pub time: DateTime<FixedOffset>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub response_length: Option<u64>,
    #[serde(default)]
    pub referer: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

fn atom(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(MISSING)
}

impl AccessEvent {
    pub fn new(method: impl Into<String>, path: impl Into<String>, status: u16) -> Self {
        Self {
            remote_addr: None,
            remote_user: None,
            time: now(),
            method: Some(method.into()),
            path: Some(path.into()),
            query: None,
            protocol: Some("HTTP/1.1".to_string()),
            status: Some(status),
            response_length: None,
            referer: None,
            user_agent: None,
        }
    }

    /// `%r`: method, path with query, protocol.
    pub fn request_line(&self) -> String {
        let target = match self.query.as_deref().filter(|q| !q.is_empty()) {
            Some(query) => format!("{}?{query}", atom(&self.path)),
            None => atom(&self.path).to_string(),
        };
        format!("{} {target} {}", atom(&self.method), atom(&self.protocol))
    }

    /// Apache combined log format.
    pub fn message(&self) -> String {
        let status = self
            .status
            .map_or_else(|| MISSING.to_string(), |s| s.to_string());
        let length = self
            .response_length
            .map_or_else(|| MISSING.to_string(), |b| b.to_string());
        format!(
            r#"{} - {} [{}] "{}" {} {} "{}" "{}""#,
            atom(&self.remote_addr),
            atom(&self.remote_user),
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            status,
            length,
            atom(&self.referer),
            atom(&self.user_agent),
        )
    }

    pub fn into_record(self) -> LogRecord {
        let mut record = LogRecord::new(ACCESS_LOGGER, Level::INFO, self.message())
            .created_at(self.time.with_timezone(&Utc))
            .with_attribute("remote_addr", atom(&self.remote_addr))
            .with_attribute("http_user_agent", atom(&self.user_agent))
            .with_attribute("request_method", atom(&self.method))
            .with_attribute("path_info", atom(&self.path))
            .with_attribute("server_protocol", atom(&self.protocol));
        if let Some(status) = self.status {
            record = record.with_attribute("status_code", status);
        }
        record
    }
}

impl From<AccessEvent> for LogRecord {
    fn from(event: AccessEvent) -> Self {
        event.into_record()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::fixed_timezone;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn event() -> AccessEvent {
        AccessEvent {
            remote_addr: Some("10.0.0.1".into()),
            remote_user: None,
            time: fixed_timezone(-420)
                .unwrap()
                .with_ymd_and_hms(2000, 10, 10, 13, 55, 36)
                .unwrap(),
            method: Some("GET".into()),
            path: Some("/apache_pb.gif".into()),
            query: Some("a=1".into()),
            protocol: Some("HTTP/1.0".into()),
            status: Some(200),
            response_length: Some(2326),
            referer: Some("http://www.example.com/start.html".into()),
            user_agent: Some("Mozilla/4.08".into()),
        }
    }

    #[test]
    fn combined_log_line() {
        assert_eq!(
            event().message(),
            r#"10.0.0.1 - - [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif?a=1 HTTP/1.0" 200 2326 "http://www.example.com/start.html" "Mozilla/4.08""#
        );
    }

    #[test]
    fn record_carries_access_atoms() {
        let record = event().into_record();
        assert_eq!(record.name, ACCESS_LOGGER);
        assert_eq!(record.level, Level::INFO);
        assert_eq!(record.attributes["remote_addr"], json!("10.0.0.1"));
        assert_eq!(record.attributes["status_code"], json!(200));
        assert_eq!(record.attributes["path_info"], json!("/apache_pb.gif"));
        assert_eq!(record.created, Utc.with_ymd_and_hms(2000, 10, 10, 20, 55, 36).unwrap());
    }

    #[test]
    fn missing_atoms_render_as_dash() {
        let mut sparse = AccessEvent::new("GET", "/", 204);
        sparse.protocol = None;
        let record = sparse.into_record();
        assert_eq!(record.attributes["server_protocol"], json!("-"));
        assert_eq!(record.attributes["http_user_agent"], json!("-"));
        assert!(record.message.starts_with(r#"- - - ["#));
        assert!(record.message.ends_with(r#""GET / -" 204 - "-" "-""#));
    }
}
