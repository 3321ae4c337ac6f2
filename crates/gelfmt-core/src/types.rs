//! Core types for gelfmt-core.
//!
//! This module defines the values that flow into the formatter: the
//! [`LogRecord`] itself, its numeric [`Level`], and the optional
//! [`RequestContext`] attached by web-facing code.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FieldError;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Numeric severity of a log event on the classic 0–50 logging scale.
///
/// Any number is a valid level; only the five named constants map onto a
/// specific syslog severity (see [`SyslogSeverity`](crate::SyslogSeverity)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(pub u16);

impl Level {
    pub const NOTSET: Level = Level(0);
    pub const DEBUG: Level = Level(10);
    pub const INFO: Level = Level(20);
    pub const WARNING: Level = Level(30);
    pub const ERROR: Level = Level(40);
    pub const CRITICAL: Level = Level(50);

    /// Canonical upper-case name, or `Level N` for unregistered numbers.
    pub fn name(self) -> Cow<'static, str> {
        match self {
            Level::CRITICAL => Cow::Borrowed("CRITICAL"),
            Level::ERROR => Cow::Borrowed("ERROR"),
            Level::WARNING => Cow::Borrowed("WARNING"),
            Level::INFO => Cow::Borrowed("INFO"),
            Level::DEBUG => Cow::Borrowed("DEBUG"),
            Level::NOTSET => Cow::Borrowed("NOTSET"),
            Level(n) => Cow::Owned(format!("Level {n}")),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Level {
    type Err = FieldError;

    /// Accepts names case-insensitively (`WARN` and `FATAL` as aliases),
    /// bare integers, and the `Level N` form produced by [`Level::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let level = match trimmed.to_ascii_uppercase().as_str() {
            "CRITICAL" | "FATAL" => Level::CRITICAL,
            "ERROR" => Level::ERROR,
            "WARNING" | "WARN" => Level::WARNING,
            "INFO" => Level::INFO,
            "DEBUG" => Level::DEBUG,
            "NOTSET" => Level::NOTSET,
            upper => {
                let digits = upper.strip_prefix("LEVEL ").unwrap_or(upper);
                digits
                    .parse::<u16>()
                    .map(Level)
                    .map_err(|_| FieldError::UnknownLevel(s.to_string()))?
            }
        };
        Ok(level)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawLevel {
            Number(u16),
            Name(String),
        }

        match RawLevel::deserialize(deserializer)? {
            RawLevel::Number(n) => Ok(Level(n)),
            RawLevel::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Request context
// ---------------------------------------------------------------------------

/// The web request a record was emitted for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<RequestUser>,
}

/// The authenticated user of a request. `id` stays a JSON value because
/// user ids are integers in some stores and strings in others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

// ---------------------------------------------------------------------------
// LogRecord
// ---------------------------------------------------------------------------

/// A single log event, as handed to the formatter.
///
/// Every field except `name`, `level`, `message` and `created` is optional.
/// Unknown keys in the serde representation land in `attributes`, which is
/// where the formatter looks up extra fields such as `status_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Logger name (`_logger_name`).
    #[serde(default = "default_logger_name")]
    pub name: String,
    #[serde(default = "default_level")]
    pub level: Level,
    #[serde(default, alias = "msg")]
    pub message: String,
    /// Creation instant. Encoded on the wire with the ISO-8601 printer.
    #[serde(default = "Utc::now", with = "crate::datetime::serde_iso8601")]
    pub created: DateTime<Utc>,
    /// Overrides the formatter's host for this record only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>,
    /// Fully rendered exception, becomes `full_message`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exc_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exc_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestContext>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

fn default_logger_name() -> String {
    "root".to_string()
}

fn default_level() -> Level {
    Level::INFO
}

impl LogRecord {
    pub fn new(name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            message: message.into(),
            created: Utc::now(),
            host: None,
            pathname: None,
            lineno: None,
            exc_info: None,
            exc_text: None,
            request: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_location(mut self, pathname: impl Into<String>, lineno: u32) -> Self {
        self.pathname = Some(pathname.into());
        self.lineno = Some(lineno);
        self
    }

    pub fn with_exception(mut self, rendered: impl Into<String>) -> Self {
        self.exc_info = Some(rendered.into());
        self
    }

    pub fn with_exc_text(mut self, text: impl Into<String>) -> Self {
        self.exc_text = Some(text.into());
        self
    }

    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
