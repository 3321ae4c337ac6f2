//! GELF-specific assertions.
//!
//! These add context-rich failure messages that show the whole GELF object
//! when a key is missing, unexpected, or carries the wrong value.

use serde_json::{Map, Value};

/// Parse one formatted GELF message (a trailing `\0` is tolerated).
pub fn parse_gelf(line: &str) -> Map<String, Value> {
    let trimmed = line.trim_end_matches('\0');
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => map,
        Ok(other) => panic!("GELF message is not a JSON object: {other}"),
        Err(err) => panic!("GELF message is not valid JSON ({err}): {line:?}"),
    }
}

/// Assert that a GELF object has `key` with an expected value.
///
/// ```rust
/// assert_gelf_key!(gelf, "_status_code", 502);
/// ```
#[macro_export]
macro_rules! assert_gelf_key {
    ($gelf:expr, $key:expr, $value:expr) => {{
        let gelf: &serde_json::Map<String, serde_json::Value> = &$gelf;
        let key: &str = $key;
        let expected = serde_json::json!($value);
        match gelf.get(key) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_gelf_key! failed:\n  gelf[{:?}]\n  expected: {}\n  actual:   {}",
                key, expected, actual
            ),
            None => panic!(
                "assert_gelf_key! failed: key {:?} not found.\n  Available keys: {:?}",
                key,
                gelf.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a GELF object does not carry `key`.
#[macro_export]
macro_rules! assert_no_gelf_key {
    ($gelf:expr, $key:expr) => {{
        let gelf: &serde_json::Map<String, serde_json::Value> = &$gelf;
        let key: &str = $key;
        if let Some(actual) = gelf.get(key) {
            panic!(
                "assert_no_gelf_key! failed: unexpected key {:?} = {}",
                key, actual
            );
        }
    }};
}

/// Assert that the object's keys are exactly the mandatory GELF keys.
pub fn assert_mandatory_only(gelf: &Map<String, Value>) {
    let mut actual: Vec<&str> = gelf.keys().map(String::as_str).collect();
    actual.sort_unstable();
    let mut expected = gelfmt_core::formatter::MANDATORY_KEYS.to_vec();
    expected.sort_unstable();
    pretty_assertions::assert_eq!(actual, expected);
}

/// Keys starting with `_`, sorted.
pub fn extra_keys(gelf: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = gelf
        .keys()
        .filter(|k| k.starts_with('_') && *k != "_logger_name" && *k != "_levelname")
        .cloned()
        .collect();
    keys.sort();
    keys
}
