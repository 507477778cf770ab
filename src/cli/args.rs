//! CLI argument definitions using clap.

use clap::Parser;

/// Claude Code Hub statistics for your terminal status line.
#[derive(Parser, Debug, Default)]
#[command(name = "cch-statusline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Hub base URL [env: CCH_URL]
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// API key [env: CCH_API_KEY]
    #[arg(short, long, value_name = "KEY")]
    pub key: Option<String>,

    /// Output format: statusline, detailed, json
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Watch mode (refresh every N seconds, default 30)
    #[arg(
        short,
        long,
        value_name = "INTERVAL",
        num_args = 0..=1,
        allow_negative_numbers = true
    )]
    pub watch: Option<Option<String>>,

    /// Stats cache lifetime in milliseconds
    #[arg(long, value_name = "MS")]
    pub cache_ttl: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Compact one- or two-line status
    #[default]
    Statusline,
    /// Multi-section report with progress bars
    Detailed,
    /// Pretty-printed statistics record
    Json,
}

impl OutputFormat {
    /// Every accepted format name.
    pub const NAMES: &'static [&'static str] = &["statusline", "detailed", "json"];

    /// Parse a format name (case-sensitive, as typed on the command line).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s {
            "statusline" => Some(Self::Statusline),
            "detailed" => Some(Self::Detailed),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Statusline => "statusline",
            Self::Detailed => "detailed",
            Self::Json => "json",
        }
    }
}
