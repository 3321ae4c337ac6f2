//! Bodies of the `gelfmt` subcommands.

use std::io::{BufRead, Write};

use anyhow::Context;
use gelfmt_core::config::GelfConfig;
use gelfmt_core::{
    parse_datetime, print_datetime, AccessEvent, ExtraField, GelfFormatter, LogRecord, Profile,
};

// ---------------------------------------------------------------------------
// format
// ---------------------------------------------------------------------------

/// Shape of each JSON input line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    /// A serialized [`LogRecord`].
    #[default]
    Record,
    /// A serialized [`AccessEvent`].
    Access,
}

/// Command-line adjustments applied on top of the `[gelf]` config section.
#[derive(Debug, Clone, Default)]
pub struct FormatterOverrides {
    pub profile: Option<Profile>,
    pub fields: Vec<ExtraField>,
    pub host: Option<String>,
    /// `None` keeps the configured framing.
    pub null_terminated: Option<bool>,
}

/// Resolve the formatter for a run: an explicit field list beats a profile,
/// and a profile given on the command line beats the configured field list.
pub fn build_formatter(config: &GelfConfig, overrides: &FormatterOverrides) -> GelfFormatter {
    let mut resolved = config.clone();
    if let Some(profile) = overrides.profile {
        resolved.profile = profile;
        resolved.extra_fields = None;
    }
    if !overrides.fields.is_empty() {
        resolved.extra_fields = Some(overrides.fields.clone());
    }
    if let Some(host) = &overrides.host {
        resolved.host = Some(host.clone());
    }
    if let Some(enabled) = overrides.null_terminated {
        resolved.null_terminated = enabled;
    }
    tracing::debug!(
        profile = %resolved.profile,
        explicit_fields = resolved.extra_fields.is_some(),
        null_terminated = resolved.null_terminated,
        "resolved formatter"
    );
    GelfFormatter::from_config(&resolved)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSummary {
    pub formatted: usize,
    pub skipped: usize,
}

fn decode(line: &str, kind: InputKind) -> serde_json::Result<LogRecord> {
    match kind {
        InputKind::Record => serde_json::from_str(line),
        InputKind::Access => serde_json::from_str::<AccessEvent>(line).map(AccessEvent::into_record),
    }
}

/// Read JSON lines from `input` and write one GELF message per decodable line
/// to `output`. Blank lines are ignored; undecodable lines are logged and
/// counted as skipped.
pub fn format_stream<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    formatter: &GelfFormatter,
    kind: InputKind,
) -> anyhow::Result<FormatSummary> {
    let mut summary = FormatSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let record = match decode(&line, kind) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(line = index + 1, error = %err, "skipping undecodable input");
                summary.skipped += 1;
                continue;
            }
        };

        let mut message = formatter.format(&record);
        if !formatter.is_null_terminated() {
            message.push('\n');
        }
        output
            .write_all(message.as_bytes())
            .context("failed to write GELF message")?;
        summary.formatted += 1;
    }

    output.flush().context("failed to flush output")?;
    tracing::info!(
        formatted = summary.formatted,
        skipped = summary.skipped,
        "format finished"
    );
    Ok(summary)
}

// ---------------------------------------------------------------------------
// datetime
// ---------------------------------------------------------------------------

/// Parse `value` and print it back in normalized form.
pub fn normalize_datetime(value: &str) -> anyhow::Result<String> {
    let parsed =
        parse_datetime(value).with_context(|| format!("{value:?} is not a valid datetime"))?;
    match parsed {
        Some(ts) => {
            tracing::debug!(aware = ts.is_aware(), "parsed datetime");
            Ok(print_datetime(ts))
        }
        None => anyhow::bail!(
            "{value:?} does not match YYYY-MM-DD[T ]HH:MM[:SS[.ffffff]][Z|±HH[:MM]]"
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gelfmt_core::FieldSet;

    #[test]
    fn explicit_fields_beat_profile() {
        let overrides = FormatterOverrides {
            profile: Some(Profile::Access),
            fields: vec![ExtraField::StatusCode],
            ..Default::default()
        };
        let formatter = build_formatter(&GelfConfig::default(), &overrides);
        assert_eq!(formatter.fields(), &FieldSet::new([ExtraField::StatusCode]));
    }

    #[test]
    fn profile_override_drops_configured_fields() {
        let config = GelfConfig {
            extra_fields: Some(vec![ExtraField::Scheme]),
            ..Default::default()
        };
        let overrides = FormatterOverrides {
            profile: Some(Profile::Request),
            ..Default::default()
        };
        let formatter = build_formatter(&config, &overrides);
        assert_eq!(formatter.fields(), &Profile::Request.fields());
    }

    #[test]
    fn host_and_null_flag_apply() {
        let overrides = FormatterOverrides {
            host: Some("web-9".into()),
            null_terminated: Some(true),
            ..Default::default()
        };
        let formatter = build_formatter(&GelfConfig::default(), &overrides);
        assert_eq!(formatter.host(), "web-9");
        assert!(formatter.is_null_terminated());
    }

    #[test]
    fn null_flag_can_switch_configured_framing_off() {
        let config = GelfConfig {
            null_terminated: true,
            ..Default::default()
        };
        let keep = build_formatter(&config, &FormatterOverrides::default());
        assert!(keep.is_null_terminated());

        let overrides = FormatterOverrides {
            null_terminated: Some(false),
            ..Default::default()
        };
        assert!(!build_formatter(&config, &overrides).is_null_terminated());
    }
}
