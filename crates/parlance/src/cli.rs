//! Command-line parsing and dispatch.

use crate::error::CliResult;
use chrono::{DateTime, ParseError, Utc};
use clap::{Parser, Subcommand};
use parlance_config::{apply_env_overrides, Config, ConfigLoader, ConfigValidator};
use parlance_i18n::{FormatDateOptions, Registry};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Names the configuration file when `--config` is not given.
pub const ENV_CONFIG: &str = "PARLANCE_CONFIG";

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = ENV_CONFIG, global = true)]
    pub config: Option<PathBuf>,

    /// What to run
    #[command(subcommand)]
    pub command: Command,
}

/// One command to run against a registry.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List supported locales with their display names
    Locales,

    /// Resolve an Accept-Language header to a locale
    Negotiate {
        /// Raw header value
        header: String,
    },

    /// Translate a message
    Translate {
        /// Requested locale code
        locale: String,
        /// Singular source text
        message: String,
        /// Disambiguating context
        #[arg(long)]
        context: Option<String>,
        /// Plural source text
        #[arg(long, requires = "count")]
        plural: Option<String>,
        /// Count selecting the plural form
        #[arg(long, requires = "plural", allow_negative_numbers = true)]
        count: Option<i64>,
    },

    /// Format an instant relative to now
    Date {
        /// Requested locale code
        locale: String,
        /// RFC 3339 instant
        #[arg(value_parser = parse_instant)]
        date: DateTime<Utc>,
        /// Minutes west of UTC
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
        /// Always include the clock time
        #[arg(long)]
        full: bool,
        /// Drop the clock time where possible
        #[arg(long)]
        shorter: bool,
        /// Never use "seconds ago" style phrasing
        #[arg(long)]
        absolute: bool,
    },

    /// Format a calendar day
    Day {
        /// Requested locale code
        locale: String,
        /// RFC 3339 instant whose local day is formatted
        #[arg(value_parser = parse_instant)]
        date: DateTime<Utc>,
        /// Minutes west of UTC
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
        /// Leave out the weekday
        #[arg(long)]
        no_weekday: bool,
    },

    /// Group an integer's digits
    Number {
        /// Requested locale code
        locale: String,
        /// Value to format
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Join items into a sentence list
    List {
        /// Requested locale code
        locale: String,
        /// Items in order
        items: Vec<String>,
    },
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|date| date.with_timezone(&Utc))
}

/// Loads configuration from `path`, or from defaults plus environment
/// overrides when no file is named.
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    if let Some(path) = path {
        return Ok(ConfigLoader::new(path).load()?);
    }

    debug!("No configuration file; using defaults");
    let mut config = Config::default();
    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    ConfigValidator::validate(&config)?;
    Ok(config)
}

/// Runs `command` and returns what should be printed.
pub fn run(registry: &Registry, command: &Command) -> CliResult<String> {
    let output = match command {
        Command::Locales => {
            let mut out = String::new();
            for (code, name) in registry.supported_locales()? {
                let _ = writeln!(out, "{code}\t{name}");
            }
            out.trim_end().to_string()
        }
        Command::Negotiate { header } => {
            let locale = registry.get_for_accept_language(header)?;
            format!("{}\t{}", locale.code(), locale.name())
        }
        Command::Translate {
            locale,
            message,
            context,
            plural,
            count,
        } => {
            let locale = registry.get(locale)?;
            match (context, plural.as_ref().zip(*count)) {
                (Some(context), Some((plural, count))) => {
                    locale.context_translate_plural(context, message, plural, count)
                }
                (Some(context), None) => locale.context_translate(context, message),
                (None, Some((plural, count))) => locale.translate_plural(message, plural, count),
                (None, None) => locale.translate(message),
            }
        }
        Command::Date {
            locale,
            date,
            offset,
            full,
            shorter,
            absolute,
        } => {
            let options = FormatDateOptions {
                gmt_offset: *offset,
                relative: !absolute,
                shorter: *shorter,
                full_format: *full,
            };
            registry.get(locale)?.format_date(*date, options)
        }
        Command::Day {
            locale,
            date,
            offset,
            no_weekday,
        } => registry.get(locale)?.format_day(*date, *offset, !no_weekday),
        Command::Number { locale, value } => registry.get(locale)?.friendly_number(*value),
        Command::List { locale, items } => registry.get(locale)?.list(items.as_slice()),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use parlance_config::I18nConfig;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("parlance").chain(args.iter().copied()))
    }

    fn registry() -> Registry {
        Registry::new(&I18nConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_translate() {
        let args = parse(&[
            "--config", "parlance.toml", "translate", "fr-fr", "club", "--context", "stick",
            "--plural", "clubs", "--count", "2",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("parlance.toml")));
        assert_eq!(
            args.command,
            Command::Translate {
                locale: "fr-fr".to_string(),
                message: "club".to_string(),
                context: Some("stick".to_string()),
                plural: Some("clubs".to_string()),
                count: Some(2),
            }
        );
    }

    #[test]
    fn test_parse_date_flags() {
        let args = parse(&[
            "date", "en_US", "2013-04-28T18:35:00Z", "--shorter", "--absolute", "--offset", "-60",
        ])
        .unwrap();

        match args.command {
            Command::Date {
                offset,
                full,
                shorter,
                absolute,
                ..
            } => {
                assert!(shorter);
                assert!(absolute);
                assert!(!full);
                assert_eq!(offset, -60);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["frobnicate"]).is_err());
        assert!(parse(&["number", "en"]).is_err());
        assert!(parse(&["locales", "--verbose"]).is_err());
        assert!(parse(&["translate", "en", "x", "--count"]).is_err());
        assert!(parse(&["translate", "en", "x", "--plural", "xs"]).is_err());
        assert!(parse(&["number", "en", "lots"]).is_err());
        assert_eq!(
            parse(&["day", "en", "yesterday"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_run_formatting_commands() {
        let registry = registry();
        let run_args = |args: &[&str]| run(&registry, &parse(args).unwrap().command).unwrap();

        assert_eq!(run_args(&["number", "en_US", "1000000"]), "1,000,000");
        assert_eq!(run_args(&["number", "en_US", "-1234"]), "-1,234");
        assert_eq!(run_args(&["list", "en_US", "A", "B", "C"]), "A, B and C");
        assert_eq!(run_args(&["list", "en_US"]), "");
        assert_eq!(run_args(&["day", "en_US", "2013-04-28T18:35:00Z"]), "Sunday, April 28");
        assert_eq!(
            run_args(&["date", "en_US", "2013-04-28T18:35:00Z", "--full"]),
            "April 28, 2013 at 6:35 pm"
        );
        assert_eq!(run_args(&["translate", "en_US", "club", "--plural", "clubs", "--count", "3"]), "clubs");
    }

    #[test]
    fn test_run_locale_listing() {
        let registry = registry();
        let listing = run(&registry, &Command::Locales).unwrap();
        assert!(listing.lines().any(|line| line == "es_LA\tEspa\u{f1}ol"));

        let negotiated = run(
            &registry,
            &Command::Negotiate {
                header: "xx, de;q=0.5".to_string(),
            },
        )
        .unwrap();
        assert_eq!(negotiated, "de_DE\tDeutsch");
    }
}
