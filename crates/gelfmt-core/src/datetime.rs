//! ISO-8601 parsing and printing with fixed-offset zones.
//!
//! The accepted grammar is
//!
//! ```text
//! YYYY-MM-DD[T ]HH:MM[:SS[.ffffff]][Z|±HH[:MM]]
//! ```
//!
//! Month, day, hour, minute and second take one or two digits. The fraction
//! keeps its first six digits and silently drops up to six more. The offset
//! colon is optional. One trailing newline is ignored.
//!
//! [`parse_datetime`] distinguishes two failure modes: a string that does not
//! match the grammar yields `Ok(None)`, a string that matches but names an
//! impossible date, time or offset yields a [`DateTimeError`].
//!
//! [`print_datetime`] always renders an explicit zone, assumes UTC for naive
//! values, and writes UTC as `Z` rather than `+00:00`.

use std::fmt::Write as _;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use regex::{Captures, Regex};

use crate::error::DateTimeError;

fn datetime_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})",
            r"[T ](?P<hour>[0-9]{1,2}):(?P<minute>[0-9]{1,2})",
            r"(?::(?P<second>[0-9]{1,2})(?:\.(?P<microsecond>[0-9]{1,6})[0-9]{0,6})?)?",
            r"(?P<tzinfo>Z|[+-][0-9]{2}(?::?[0-9]{2})?)?",
            // A single trailing newline is tolerated, nothing else.
            r"\n?$",
        ))
        .expect("datetime grammar must be a valid regex")
    })
}

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// A parsed datetime: naive when the input carried no zone suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Fixed(DateTime<FixedOffset>),
}

impl Timestamp {
    pub fn is_aware(&self) -> bool {
        matches!(self, Timestamp::Fixed(_))
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Timestamp::Naive(_) => None,
            Timestamp::Fixed(dt) => Some(*dt.offset()),
        }
    }

    /// Attach UTC to naive values; aware values are returned unchanged.
    pub fn assume_utc(&self) -> DateTime<FixedOffset> {
        match self {
            Timestamp::Naive(naive) => naive.and_utc().fixed_offset(),
            Timestamp::Fixed(dt) => *dt,
        }
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.assume_utc().with_timezone(&Utc)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(value: DateTime<Tz>) -> Self {
        Timestamp::Fixed(value.fixed_offset())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp::Naive(value)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_datetime(*self))
    }
}

// ---------------------------------------------------------------------------
// Fixed offsets
// ---------------------------------------------------------------------------

/// Build a zone `minutes` east of UTC.
pub fn fixed_timezone(minutes: i32) -> Result<FixedOffset, DateTimeError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(DateTimeError::InvalidOffset { minutes })
}

/// The `±HHMM` name of a fixed offset, e.g. `+0530` or `-0800`.
pub fn timezone_name(offset: FixedOffset) -> String {
    let minutes = offset.local_minus_utc() / 60;
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.abs();
    format!("{sign}{:02}{:02}", abs / 60, abs % 60)
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

fn parse_offset(tzinfo: &str) -> Result<FixedOffset, DateTimeError> {
    if tzinfo == "Z" {
        return fixed_timezone(0);
    }
    let hours: i32 = tzinfo[1..3].parse().unwrap_or(0);
    let minutes: i32 = if tzinfo.len() > 3 {
        tzinfo[tzinfo.len() - 2..].parse().unwrap_or(0)
    } else {
        0
    };
    let total = 60 * hours + minutes;
    fixed_timezone(if tzinfo.starts_with('-') { -total } else { total })
}

/// Parse `value` against the ISO-8601 grammar.
///
/// Returns `Ok(None)` when the string does not match the grammar and an
/// error when it matches but is not a real date, time or offset.
pub fn parse_datetime(value: &str) -> Result<Option<Timestamp>, DateTimeError> {
    let Some(caps) = datetime_re().captures(value) else {
        return Ok(None);
    };

    let year = caps
        .name("year")
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .unwrap_or(0);
    let month = number(&caps, "month").unwrap_or(0);
    let day = number(&caps, "day").unwrap_or(0);
    let hour = number(&caps, "hour").unwrap_or(0);
    let minute = number(&caps, "minute").unwrap_or(0);
    let second = number(&caps, "second").unwrap_or(0);
    let microsecond = caps
        .name("microsecond")
        .and_then(|m| format!("{:0<6}", m.as_str()).parse().ok())
        .unwrap_or(0);

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .filter(|_| year >= 1)
        .ok_or(DateTimeError::InvalidDate { year, month, day })?;
    let time = NaiveTime::from_hms_micro_opt(hour, minute, second, microsecond).ok_or(
        DateTimeError::InvalidTime {
            hour,
            minute,
            second,
            microsecond,
        },
    )?;
    let naive = NaiveDateTime::new(date, time);

    let Some(tzinfo) = caps.name("tzinfo") else {
        return Ok(Some(Timestamp::Naive(naive)));
    };
    let offset = parse_offset(tzinfo.as_str())?;
    let aware = naive
        .and_local_timezone(offset)
        .single()
        .ok_or(DateTimeError::InvalidOffset {
            minutes: offset.local_minus_utc() / 60,
        })?;
    Ok(Some(Timestamp::Fixed(aware)))
}

// ---------------------------------------------------------------------------
// Print
// ---------------------------------------------------------------------------

/// Render a timestamp as ISO-8601 with an explicit zone.
pub fn print_datetime(value: impl Into<Timestamp>) -> String {
    let dt = value.into().assume_utc();
    let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();

    let microsecond = (dt.nanosecond() % 1_000_000_000) / 1_000;
    if microsecond != 0 {
        let _ = write!(out, ".{microsecond:06}");
    }

    let seconds = dt.offset().local_minus_utc();
    if seconds == 0 {
        out.push('Z');
        return out;
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.abs();
    let _ = write!(out, "{sign}{:02}:{:02}", abs / 3600, abs % 3600 / 60);
    if abs % 60 != 0 {
        let _ = write!(out, ":{:02}", abs % 60);
    }
    out
}

// ---------------------------------------------------------------------------
// serde
// ---------------------------------------------------------------------------

/// `#[serde(with = "gelfmt_core::datetime::serde_iso8601")]` for
/// `DateTime<Utc>` fields, encoded through [`print_datetime`] and decoded
/// through [`parse_datetime`].
pub mod serde_iso8601 {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_datetime, print_datetime};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&print_datetime(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match parse_datetime(&raw).map_err(D::Error::custom)? {
            Some(ts) => Ok(ts.to_utc()),
            None => Err(D::Error::custom(format!("{raw:?} is not an ISO-8601 datetime"))),
        }
    }

    /// Same encoding for `DateTime<FixedOffset>`; naive input is read as UTC.
    pub mod fixed {
        use chrono::{DateTime, FixedOffset};
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::{parse_datetime, print_datetime};

        pub fn serialize<S: Serializer>(
            value: &DateTime<FixedOffset>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&print_datetime(*value))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<DateTime<FixedOffset>, D::Error> {
            let raw = String::deserialize(deserializer)?;
            match parse_datetime(&raw).map_err(D::Error::custom)? {
                Some(ts) => Ok(ts.assume_utc()),
                None => Err(D::Error::custom(format!("{raw:?} is not an ISO-8601 datetime"))),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
