//! gelfmt-layer — GELF output for `tracing`.
//!
//! [`GelfLayer`] is a `tracing_subscriber::Layer` that turns every event into
//! a [`gelfmt_core::LogRecord`] and writes it through a
//! [`gelfmt_core::GelfFormatter`], one message per line.
//!
//! ```text
//! tracing::Event ──► GelfLayer ──► LogRecord ──► GelfFormatter ──► MakeWriter
//!                       ▲
//!                       └── fields of the enclosing spans (root first)
//! ```
//!
//! # Field mapping
//!
//! | Event data | Record |
//! |------------|--------|
//! | target | logger name |
//! | level | level (`TRACE` folds into `DEBUG`) |
//! | `message` | message |
//! | `exception` | rendered exception (`full_message`) |
//! | `exc_text` / `host` | the matching record fields |
//! | file / line | source location |
//! | anything else | extra attribute |

mod layer;
mod visitor;

pub use layer::GelfLayer;
pub use visitor::level_from_tracing;
