//! gelfmt-core — GELF formatting and ISO-8601 datetime helpers.
//!
//! This crate holds everything that does not depend on a logging framework:
//! the record types, the syslog severity mapping, the optional field sets,
//! the formatter itself, access-log events, the datetime parser/printer and
//! the config file.
//!
//! # Data flow
//!
//! ```text
//! AccessEvent ──┐
//!               ▼
//! LogRecord ──► GelfFormatter ──► GELF JSON
//!                    ▲
//!                    └── FieldSet (Profile / config / per call)
//!
//! &str ──► parse_datetime ──► Timestamp ──► print_datetime ──► String
//! ```

pub mod access;
pub mod config;
pub mod datetime;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod severity;
pub mod types;

pub use access::AccessEvent;
pub use datetime::{parse_datetime, print_datetime, Timestamp};
pub use error::{DateTimeError, FieldError};
pub use fields::{ExtraField, FieldSet, Profile};
pub use formatter::GelfFormatter;
pub use severity::SyslogSeverity;
pub use types::{Level, LogRecord, RequestContext, RequestUser};
