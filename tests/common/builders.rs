//! Test builders — ready-made records, events and formatters.
//!
//! Everything here uses a fixed instant and a fixed host so formatted output
//! is deterministic and can be snapshotted.

use chrono::{DateTime, TimeZone, Utc};
use gelfmt_core::datetime::fixed_timezone;
use gelfmt_core::{AccessEvent, GelfFormatter, Level, LogRecord, Profile, RequestContext, RequestUser};

pub const TEST_HOST: &str = "test-host";

/// 2019-01-01T00:00:00.5Z
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.timestamp_opt(1_546_300_800, 500_000_000).unwrap()
}

/// A formatter for `profile` reporting [`TEST_HOST`].
pub fn test_formatter(profile: Profile) -> GelfFormatter {
    GelfFormatter::from_profile(profile).with_host(TEST_HOST)
}

/// A record with nothing but the mandatory data set.
pub fn bare_record(level: Level, message: &str) -> LogRecord {
    LogRecord::new("app", level, message).created_at(fixed_instant())
}

/// Build an INFO record.
pub fn info_record(message: &str) -> LogRecord {
    bare_record(Level::INFO, message)
}

/// A record as a request handler would emit it: location, status code and
/// request context all set.
pub fn web_request_record() -> LogRecord {
    LogRecord::new("app.views", Level::ERROR, "payment failed")
        .created_at(fixed_instant())
        .with_location("app/views.py", 42)
        .with_exception("Traceback (most recent call last):\n  ValueError: bad card")
        .with_attribute("status_code", 502)
        .with_request(RequestContext {
            scheme: Some("https".into()),
            method: Some("POST".into()),
            user: Some(RequestUser {
                id: Some(7.into()),
                username: Some("alice".into()),
            }),
        })
}

/// The classic Apache documentation request.
pub fn sample_access_event() -> AccessEvent {
    AccessEvent {
        remote_addr: Some("10.0.0.1".into()),
        remote_user: None,
        time: fixed_timezone(-420)
            .unwrap()
            .with_ymd_and_hms(2000, 10, 10, 13, 55, 36)
            .unwrap(),
        method: Some("GET".into()),
        path: Some("/apache_pb.gif".into()),
        query: None,
        protocol: Some("HTTP/1.0".into()),
        status: Some(200),
        response_length: Some(2326),
        referer: Some("http://www.example.com/start.html".into()),
        user_agent: Some("Mozilla/4.08".into()),
    }
}
