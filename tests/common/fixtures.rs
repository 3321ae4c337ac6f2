//! Static corpora used across harnesses.

/// Zoned datetimes paired with the UTC instant they denote, as RFC 3339.
pub const ZONED_DATETIMES: &[(&str, &str)] = &[
    ("2019-01-01T00:00:00Z", "2019-01-01T00:00:00+00:00"),
    ("2019-01-01 00:00:00Z", "2019-01-01T00:00:00+00:00"),
    ("2019-01-01T00:00Z", "2019-01-01T00:00:00+00:00"),
    ("2019-1-1T0:0:0Z", "2019-01-01T00:00:00+00:00"),
    ("2019-06-15T12:30:45+02:00", "2019-06-15T10:30:45+00:00"),
    ("2019-06-15T12:30:45+0200", "2019-06-15T10:30:45+00:00"),
    ("2019-06-15T12:30:45+02", "2019-06-15T10:30:45+00:00"),
    ("2019-06-15T12:30:45-05:30", "2019-06-15T18:00:45+00:00"),
    ("2019-12-31T23:59:59.999999-01:00", "2020-01-01T00:59:59.999999+00:00"),
    ("2020-02-29T08:00:00.25+00:00", "2020-02-29T08:00:00.250+00:00"),
    ("1999-12-31T23:00:00-23:59", "2000-01-01T22:59:00+00:00"),
    ("2019-01-01T00:00:00Z\n", "2019-01-01T00:00:00+00:00"),
];

/// Strings that do not match the grammar at all.
pub const NON_MATCHING: &[&str] = &[
    "not-a-date",
    "",
    "2019-01-01",
    "2019/01/01T00:00:00Z",
    "19-01-01T00:00:00Z",
    "2019-01-01T00",
    "2019-01-01T00:00:00+5",
    "2019-01-01T00:00:00 UTC",
    "2019-01-01T00:00:00.1234567890123Z",
    " 2019-01-01T00:00:00Z",
    "2019-01-01T00:00:00Z ",
    "2019-01-01T00:00:00Z\n\n",
    "2019-01-01T00:00:00Z\r\n",
];

/// Strings that match the grammar but name no real instant.
pub const IMPOSSIBLE: &[&str] = &[
    "2019-13-01T00:00:00Z",
    "2019-00-10T00:00:00Z",
    "2019-02-30T00:00:00Z",
    "2019-02-29T00:00:00Z",
    "0000-01-01T00:00:00Z",
    "2019-01-01T24:00:00Z",
    "2019-01-01T23:60:00Z",
    "2019-01-01T23:59:60Z",
    "2019-01-01T00:00:00+24:00",
    "2019-01-01T00:00:00-99:99",
];

/// JSON log records as fed to `gelfmt format`.
pub const RECORD_LINES: &[&str] = &[
    r#"{"name":"api","level":"INFO","message":"started","created":"2019-01-01T00:00:00Z"}"#,
    r#"{"name":"api","level":"ERROR","msg":"upstream timeout","created":"2019-01-01T00:00:01Z","status_code":504,"pathname":"api/proxy.py","lineno":88}"#,
    r#"{"name":"worker","level":30,"message":"retrying","created":"2019-01-01T00:00:02+01:00","attempt":2}"#,
];

/// HTTP access events as fed to `gelfmt format --access`.
pub const ACCESS_LINES: &[&str] = &[
    r#"{"remote_addr":"10.0.0.1","time":"2019-01-01T10:00:00+01:00","method":"GET","path":"/healthz","protocol":"HTTP/1.1","status":200,"user_agent":"kube-probe/1.29"}"#,
    r#"{"remote_addr":"10.0.0.2","time":"2019-01-01T10:00:01+01:00","method":"POST","path":"/api/v1/orders","query":"dry_run=1","protocol":"HTTP/1.1","status":201,"response_length":38}"#,
];
