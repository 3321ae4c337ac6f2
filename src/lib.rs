//! gelfmt — GELF log formatting and ISO-8601 datetime tools.
//!
//! The root crate wires the library crates into the `gelfmt` binary. Command
//! bodies live here rather than in `main.rs` so that integration tests can
//! drive them with in-memory readers and writers.
//!
//! # Crates
//!
//! ```text
//! gelfmt-core ──► gelfmt-layer
//!      │               │
//!      └───────┬───────┘
//!              ▼
//!           gelfmt (commands, telemetry, binary)
//! ```

pub mod commands;
pub mod telemetry;

pub use gelfmt_core::{
    parse_datetime, print_datetime, AccessEvent, ExtraField, FieldSet, GelfFormatter, Level,
    LogRecord, Profile, SyslogSeverity, Timestamp,
};
pub use gelfmt_layer::GelfLayer;
