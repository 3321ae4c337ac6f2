use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gelfmt::commands::{self, FormatterOverrides, InputKind};
use gelfmt_core::config::{Config, LogFormat};
use gelfmt_core::{ExtraField, Profile};

#[derive(Parser)]
#[command(name = "gelfmt", about = "GELF log formatting and ISO-8601 datetime tools")]
struct Cli {
    /// Config file (default: ~/.config/gelfmt/config.toml, created on first run).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/gelfmt-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Format of gelfmt's own diagnostics on stderr.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read JSON log records from stdin and write GELF messages to stdout.
    Format(FormatArgs),
    /// Parse an ISO-8601 datetime and print its normalized form.
    Datetime {
        value: String,
    },
}

#[derive(Args)]
struct FormatArgs {
    /// Field profile: basic, request, web_request or access.
    #[arg(long, value_parser = parse_profile)]
    profile: Option<Profile>,

    /// Enable one optional field; repeatable. Replaces the profile.
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<ExtraField>,

    /// Host reported in every message.
    #[arg(long)]
    host: Option<String>,

    /// Terminate messages with \0 instead of a newline.
    #[arg(long, overrides_with = "no_null_terminated")]
    null_terminated: bool,

    /// Terminate messages with a newline even if the config asks for \0.
    #[arg(long, overrides_with = "null_terminated")]
    no_null_terminated: bool,

    /// Input lines are HTTP access events rather than log records.
    #[arg(long)]
    access: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Gelf,
}

fn parse_profile(s: &str) -> Result<Profile, String> {
    s.parse().map_err(|e: gelfmt_core::FieldError| e.to_string())
}

fn parse_field(s: &str) -> Result<ExtraField, String> {
    s.parse().map_err(|e: gelfmt_core::FieldError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            eprintln!("gelfmt: ignoring config ({err:#}); using built-in defaults");
            Config::defaults()
        }),
    };
    if let Some(format) = cli.log_format {
        config.logging.format = match format {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Gelf => LogFormat::Gelf,
        };
    }
    gelfmt::telemetry::init(&config.logging, cli.debug)?;

    match cli.command {
        Command::Format(args) => {
            let overrides = FormatterOverrides {
                profile: args.profile,
                fields: args.fields,
                host: args.host,
                null_terminated: match (args.null_terminated, args.no_null_terminated) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            let formatter = commands::build_formatter(&config.gelf, &overrides);
            let kind = if args.access {
                InputKind::Access
            } else {
                InputKind::Record
            };
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            commands::format_stream(stdin.lock(), stdout.lock(), &formatter, kind)?;
        }
        Command::Datetime { value } => {
            println!("{}", commands::normalize_datetime(&value)?);
        }
    }
    Ok(())
}
