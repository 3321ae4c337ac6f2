//! Error types for gelfmt-core.
//!
//! Only inputs that are well-formed but semantically wrong produce errors.
//! Malformed datetime strings are not errors: [`parse_datetime`] returns
//! `Ok(None)` for them.
//!
//! [`parse_datetime`]: crate::datetime::parse_datetime

use thiserror::Error;

/// A datetime string matched the ISO-8601 grammar but does not name a real
/// instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("invalid time of day {hour:02}:{minute:02}:{second:02}.{microsecond:06}")]
    InvalidTime {
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    },

    /// Offsets must lie strictly inside ±24 hours.
    #[error("utc offset of {minutes} minutes is out of range")]
    InvalidOffset { minutes: i32 },
}

/// Lookup failures for names that must belong to a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown extra field {0:?}")]
    UnknownField(String),

    #[error("unknown field profile {0:?}")]
    UnknownProfile(String),

    #[error("unknown log level {0:?}")]
    UnknownLevel(String),
}
