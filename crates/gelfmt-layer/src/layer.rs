use std::io::{self, Write};

use chrono::Utc;
use gelfmt_core::{GelfFormatter, LogRecord};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::visitor::{apply_field, level_from_tracing, FieldCollector, SpanFields};

/// Writes one GELF message per tracing event.
///
/// Messages are newline-terminated, or `\0`-terminated when the formatter is
/// configured for null termination. Write errors are dropped: a logging layer
/// has nowhere to report them.
pub struct GelfLayer<W = fn() -> io::Stdout> {
    formatter: GelfFormatter,
    make_writer: W,
}

impl GelfLayer {
    pub fn new(formatter: GelfFormatter) -> Self {
        Self {
            formatter,
            make_writer: io::stdout,
        }
    }
}

impl<W> GelfLayer<W> {
    pub fn with_writer<W2>(self, make_writer: W2) -> GelfLayer<W2>
    where
        W2: for<'a> MakeWriter<'a> + 'static,
    {
        GelfLayer {
            formatter: self.formatter,
            make_writer,
        }
    }

    fn build_record<S>(&self, event: &Event<'_>, ctx: &Context<'_, S>) -> LogRecord
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let meta = event.metadata();
        let mut record = LogRecord::new(meta.target(), level_from_tracing(meta.level()), "")
            .created_at(Utc::now());
        record.pathname = meta.file().map(str::to_string);
        record.lineno = meta.line();

        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<SpanFields>() {
                    for (name, value) in &fields.0 {
                        apply_field(&mut record, name, value.clone());
                    }
                }
            }
        }

        let mut fields = Default::default();
        event.record(&mut FieldCollector(&mut fields));
        for (name, value) in fields {
            apply_field(&mut record, name, value);
        }
        record
    }
}

impl<S, W> Layer<S> for GelfLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = SpanFields::default();
        attrs.record(&mut FieldCollector(&mut fields.0));
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(fields) = extensions.get_mut::<SpanFields>() {
            values.record(&mut FieldCollector(&mut fields.0));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let record = self.build_record(event, &ctx);
        let mut line = self.formatter.format(&record);
        if !self.formatter.is_null_terminated() {
            line.push('\n');
        }
        let mut writer = self.make_writer.make_writer_for(event.metadata());
        let _ = writer.write_all(line.as_bytes());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
