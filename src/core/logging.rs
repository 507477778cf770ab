//! Diagnostic logging to stderr.
//!
//! Rendered output goes to stdout; everything emitted through `tracing`
//! goes to stderr (or `CCH_LOG_FILE`), so status-line hosts only ever see
//! the rendered text.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::cli::Cli;
use crate::storage::config::{ENV_NO_COLOR, ENV_NO_COLOR_STD};
use crate::util::env::stderr_is_tty;

const LOG_LEVEL_ENV: &str = "CCH_LOG";
const LOG_FORMAT_ENV: &str = "CCH_LOG_FORMAT";
const LOG_FILE_ENV: &str = "CCH_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Level and message, no timestamps.
    #[default]
    Human,
    /// One JSON object per event.
    Json,
    /// Single line with target.
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Log level from `--log-level` or `CCH_LOG`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

impl LogLevel {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "verbose" | "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Directive for this crate's target.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "cch_statusline=trace",
            Self::Debug => "cch_statusline=debug",
            Self::Info => "cch_statusline=info",
            Self::Warn => "cch_statusline=warn",
            Self::Error => "cch_statusline=error",
        }
    }
}

/// Subscriber settings resolved from flags and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LogLevel,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    /// Emit ANSI escapes in human and compact output.
    pub ansi: bool,
}

impl LogSettings {
    /// Resolve settings from the parsed CLI and the process environment.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::from_cli_with(cli, |name| std::env::var(name).ok(), stderr_is_tty())
    }

    /// Resolve settings with an injected environment and TTY state.
    ///
    /// `--log-level` wins over `CCH_LOG`; `-v` raises the default to debug.
    /// `--json-output` wins over `CCH_LOG_FORMAT`. Colors follow the same
    /// switches as rendered output and are always off for log files.
    #[must_use]
    pub fn from_cli_with(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
        stderr_tty: bool,
    ) -> Self {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let level = cli
            .log_level
            .as_deref()
            .and_then(LogLevel::from_arg)
            .or_else(|| env(LOG_LEVEL_ENV).and_then(|v| LogLevel::from_arg(v.trim())))
            .unwrap_or(if cli.verbose {
                LogLevel::Debug
            } else {
                LogLevel::Error
            });

        let format = if cli.json_output {
            LogFormat::Json
        } else {
            env(LOG_FORMAT_ENV)
                .and_then(|v| LogFormat::from_arg(v.trim()))
                .unwrap_or_default()
        };

        let file = env(LOG_FILE_ENV).map(|v| PathBuf::from(v.trim()));

        let ansi = stderr_tty
            && file.is_none()
            && !cli.no_color
            && env(ENV_NO_COLOR).is_none()
            && env(ENV_NO_COLOR_STD).is_none();

        Self {
            level,
            format,
            file,
            ansi,
        }
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_filter()));

    // An unopenable log file falls back to stderr.
    let writer = settings
        .file
        .as_ref()
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok())
        .map_or_else(|| BoxMakeWriter::new(std::io::stderr), BoxMakeWriter::new);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(settings.ansi);

    match settings.format {
        LogFormat::Json => builder.json().try_init().ok(),
        LogFormat::Compact => builder.compact().with_target(true).try_init().ok(),
        LogFormat::Human => builder.with_target(false).without_time().try_init().ok(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn settings(args: &[&str], vars: &[(&str, &str)], tty: bool) -> LogSettings {
        let cli = Cli::parse_from(std::iter::once("cch-statusline").chain(args.iter().copied()));
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        LogSettings::from_cli_with(
            &cli,
            |name| vars.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone()),
            tty,
        )
    }

    #[test]
    fn defaults_to_error_human_with_color_on_tty() {
        let s = settings(&[], &[], true);
        assert_eq!(s.level, LogLevel::Error);
        assert_eq!(s.format, LogFormat::Human);
        assert!(s.ansi);
        assert!(s.file.is_none());
    }

    #[test]
    fn no_color_disables_ansi() {
        assert!(!settings(&["--no-color"], &[], true).ansi);
        assert!(!settings(&[], &[("NO_COLOR", "1")], true).ansi);
        assert!(!settings(&[], &[("CCH_NO_COLOR", "1")], true).ansi);
        assert!(!settings(&[], &[], false).ansi);
    }

    #[test]
    fn log_file_disables_ansi() {
        let s = settings(&[], &[("CCH_LOG_FILE", "/tmp/cch.log")], true);
        assert_eq!(s.file, Some(PathBuf::from("/tmp/cch.log")));
        assert!(!s.ansi);
    }

    #[test]
    fn level_precedence() {
        assert_eq!(settings(&["-v"], &[], false).level, LogLevel::Debug);
        assert_eq!(settings(&[], &[("CCH_LOG", "warn")], false).level, LogLevel::Warn);
        assert_eq!(
            settings(&["--log-level", "trace", "-v"], &[("CCH_LOG", "warn")], false).level,
            LogLevel::Trace
        );
        assert_eq!(settings(&[], &[("CCH_LOG", "  ")], false).level, LogLevel::Error);
    }

    #[test]
    fn json_output_flag_wins_over_env_format() {
        let s = settings(&["--json-output"], &[("CCH_LOG_FORMAT", "compact")], false);
        assert_eq!(s.format, LogFormat::Json);
        let s = settings(&[], &[("CCH_LOG_FORMAT", "COMPACT")], false);
        assert_eq!(s.format, LogFormat::Compact);
    }

    #[test]
    fn level_aliases() {
        assert_eq!(LogLevel::from_arg("verbose"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_arg("WARNING"), Some(LogLevel::Warn));
        assert!(LogLevel::from_arg("loud").is_none());
        assert_eq!(LogLevel::Info.as_filter(), "cch_statusline=info");
    }
}
