//! Configuration file loading and resolution.
//!
//! Loads configuration from `<config dir>/cch-statusline/config.toml`
//! (e.g. `~/.config/cch-statusline/config.toml` on Linux).
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `CCH_URL`, then `ANTHROPIC_BASE_URL`: Hub base URL
//! - `CCH_API_KEY`, then `ANTHROPIC_AUTH_TOKEN`: API key
//! - `CCH_FORMAT`: Output format (statusline, detailed, json)
//! - `CCH_CACHE_TTL_MS`: Stats cache lifetime in milliseconds
//! - `CCH_TIMEOUT`: Request timeout in seconds
//! - `CCH_NO_COLOR` or `NO_COLOR`: Disable colors
//! - `CCH_CONFIG`: Override config file path

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::cli::args::{Cli, OutputFormat};
use crate::error::{HubError, Result};

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable for the Hub base URL.
pub const ENV_URL: &str = "CCH_URL";
/// Fallback URL variable shared with the editor integration.
pub const ENV_URL_FALLBACK: &str = "ANTHROPIC_BASE_URL";
/// Environment variable for the API key.
pub const ENV_API_KEY: &str = "CCH_API_KEY";
/// Fallback key variable shared with the editor integration.
pub const ENV_API_KEY_FALLBACK: &str = "ANTHROPIC_AUTH_TOKEN";
/// Environment variable for output format.
pub const ENV_FORMAT: &str = "CCH_FORMAT";
/// Environment variable for the cache TTL in milliseconds.
pub const ENV_CACHE_TTL: &str = "CCH_CACHE_TTL_MS";
/// Environment variable for timeout in seconds.
pub const ENV_TIMEOUT: &str = "CCH_TIMEOUT";
/// Environment variable to disable colors.
pub const ENV_NO_COLOR: &str = "CCH_NO_COLOR";
/// Standard environment variable to disable colors.
pub const ENV_NO_COLOR_STD: &str = "NO_COLOR";
/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "CCH_CONFIG";

/// Smallest accepted watch interval.
pub const MIN_WATCH_INTERVAL_SECS: u64 = 1;

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved and validated settings for one run.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Hub base URL.
    pub url: String,
    /// API key (also the session credential).
    pub api_key: String,
    /// Output format.
    pub format: OutputFormat,
    /// Watch interval, or `None` for a one-shot run.
    pub watch: Option<Duration>,
    /// Stats cache lifetime.
    pub cache_ttl: Duration,
    /// Request timeout.
    pub timeout: Duration,
    /// Whether to disable colored output.
    pub no_color: bool,
    /// Source of each setting for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub url: ConfigSource,
    pub api_key: ConfigSource,
    pub format: ConfigSource,
    pub watch: ConfigSource,
    pub cache_ttl: ConfigSource,
    pub timeout: ConfigSource,
    pub no_color: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from CLI flag.
    Cli,
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl ResolvedConfig {
    /// Resolve final configuration from CLI args, the process environment
    /// and the config file.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Config`] for an invalid config file and
    /// [`HubError::Validation`] for missing or invalid run settings.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let config = Self::load_config()?;
        Self::resolve_with(cli, &config, |name| std::env::var(name).ok())
    }

    /// Resolve against an explicit config and environment lookup.
    ///
    /// Validation order is key, URL, format, watch interval; all of it
    /// happens before any network activity.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_with(
        cli: &Cli,
        config: &Config,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        config.validate()?;

        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        let mut sources = ConfigSources::default();

        let api_key = Self::resolve_api_key(cli, &env, &mut sources.api_key)?;
        let url = Self::resolve_url(cli, config, &env, &mut sources.url)?;
        let format = Self::resolve_format(cli, config, &env, &mut sources.format)?;
        let watch = Self::resolve_watch(cli, config, &mut sources.watch)?;
        let cache_ttl = Self::resolve_cache_ttl(cli, config, &env, &mut sources.cache_ttl);
        let timeout = Self::resolve_timeout(cli, config, &env, &mut sources.timeout);
        let no_color = Self::resolve_no_color(cli, config, &env, &mut sources.no_color);

        Ok(Self {
            url,
            api_key,
            format,
            watch,
            cache_ttl,
            timeout,
            no_color,
            sources,
        })
    }

    /// Load config file, respecting `CCH_CONFIG` override.
    fn load_config() -> Result<Config> {
        if let Ok(path) = std::env::var(ENV_CONFIG) {
            Config::load_from(Path::new(&path))
        } else {
            Config::load()
        }
    }

    fn resolve_api_key(
        cli: &Cli,
        env: &impl Fn(&str) -> Option<String>,
        source: &mut ConfigSource,
    ) -> Result<String> {
        if let Some(key) = cli.key.as_deref().filter(|k| !k.trim().is_empty()) {
            *source = ConfigSource::Cli;
            return Ok(key.to_string());
        }

        if let Some(key) = env(ENV_API_KEY).or_else(|| env(ENV_API_KEY_FALLBACK)) {
            *source = ConfigSource::Env;
            return Ok(key);
        }

        Err(HubError::Validation("API key is required".to_string()))
    }

    fn resolve_url(
        cli: &Cli,
        config: &Config,
        env: &impl Fn(&str) -> Option<String>,
        source: &mut ConfigSource,
    ) -> Result<String> {
        if let Some(url) = cli.url.as_deref().filter(|u| !u.trim().is_empty()) {
            *source = ConfigSource::Cli;
            return Ok(url.to_string());
        }

        if let Some(url) = env(ENV_URL).or_else(|| env(ENV_URL_FALLBACK)) {
            *source = ConfigSource::Env;
            return Ok(url);
        }

        if let Some(url) = &config.hub.url {
            *source = ConfigSource::ConfigFile;
            return Ok(url.clone());
        }

        Err(HubError::Validation("Hub URL is required".to_string()))
    }

    fn resolve_format(
        cli: &Cli,
        config: &Config,
        env: &impl Fn(&str) -> Option<String>,
        source: &mut ConfigSource,
    ) -> Result<OutputFormat> {
        let (raw, from) = if let Some(format) = &cli.format {
            (format.clone(), ConfigSource::Cli)
        } else if let Some(format) = env(ENV_FORMAT) {
            (format, ConfigSource::Env)
        } else if let Some(format) = &config.output.format {
            (format.clone(), ConfigSource::ConfigFile)
        } else {
            *source = ConfigSource::Default;
            return Ok(OutputFormat::default());
        };

        *source = from;
        Self::parse_format(&raw)
    }

    /// Parse a format string into [`OutputFormat`].
    fn parse_format(s: &str) -> Result<OutputFormat> {
        OutputFormat::from_arg(s)
            .ok_or_else(|| HubError::Validation(format!("Invalid format: {s}")))
    }

    fn resolve_watch(
        cli: &Cli,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<Option<Duration>> {
        match &cli.watch {
            None => Ok(None),
            Some(None) => {
                *source = ConfigSource::ConfigFile;
                Ok(Some(Duration::from_secs(config.watch.interval_seconds)))
            }
            Some(Some(raw)) => {
                *source = ConfigSource::Cli;
                parse_watch_interval(raw).map(Some)
            }
        }
    }

    fn resolve_cache_ttl(
        cli: &Cli,
        config: &Config,
        env: &impl Fn(&str) -> Option<String>,
        source: &mut ConfigSource,
    ) -> Duration {
        if let Some(ms) = cli.cache_ttl {
            *source = ConfigSource::Cli;
            return Duration::from_millis(ms);
        }

        if let Some(ms) = env(ENV_CACHE_TTL).and_then(|v| v.trim().parse::<u64>().ok()) {
            *source = ConfigSource::Env;
            return Duration::from_millis(ms);
        }

        *source = ConfigSource::ConfigFile;
        Duration::from_millis(config.cache.ttl_ms)
    }

    fn resolve_timeout(
        cli: &Cli,
        config: &Config,
        env: &impl Fn(&str) -> Option<String>,
        source: &mut ConfigSource,
    ) -> Duration {
        if let Some(secs) = cli.timeout.filter(|s| *s > 0) {
            *source = ConfigSource::Cli;
            return Duration::from_secs(secs);
        }

        if let Some(secs) = env(ENV_TIMEOUT)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|s| *s > 0)
        {
            *source = ConfigSource::Env;
            return Duration::from_secs(secs);
        }

        *source = ConfigSource::ConfigFile;
        Duration::from_secs(config.hub.timeout_seconds)
    }

    fn resolve_no_color(
        cli: &Cli,
        config: &Config,
        env: &impl Fn(&str) -> Option<String>,
        source: &mut ConfigSource,
    ) -> bool {
        if cli.no_color {
            *source = ConfigSource::Cli;
            return true;
        }

        if env(ENV_NO_COLOR).is_some_and(|v| is_truthy(&v)) || env(ENV_NO_COLOR_STD).is_some() {
            *source = ConfigSource::Env;
            return true;
        }

        if !config.output.color {
            *source = ConfigSource::ConfigFile;
            return true;
        }

        *source = ConfigSource::Default;
        false
    }
}

/// Parse a watch interval in whole seconds (minimum 1).
///
/// # Errors
///
/// Returns [`HubError::Validation`] for non-numeric, zero or negative input.
pub fn parse_watch_interval(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs >= MIN_WATCH_INTERVAL_SECS)
        .map(Duration::from_secs)
        .ok_or_else(|| HubError::Validation(format!("Invalid watch interval: {raw}")))
}

/// Check if a value is truthy (1, true, yes, on).
fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

// =============================================================================
// Config file
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hub connection settings.
    pub hub: HubConfig,
    /// Stats cache settings.
    pub cache: CacheConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Watch mode settings.
    pub watch: WatchConfig,
}

/// Hub connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Hub base URL.
    pub url: Option<String>,
    /// Timeout for network requests in seconds.
    pub timeout_seconds: u64,
}

/// Stats cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long derived statistics stay fresh, in milliseconds.
    pub ttl_ms: u64,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (statusline, detailed, json).
    pub format: Option<String>,
    /// Whether to use colors in output.
    pub color: bool,
}

/// Watch mode configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Interval used by a bare `--watch`, in seconds.
    pub interval_seconds: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_seconds: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_ms: 7000 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 30,
        }
    }
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().config_file())
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HubError::Config(format!("Invalid config file: {e}")))
    }

    /// Validate configuration values.
    ///
    /// Checks that:
    /// - Output format is valid (statusline, detailed, json)
    /// - Timeout is within reasonable bounds (1-300 seconds)
    /// - Watch interval is at least 1 second
    pub fn validate(&self) -> Result<()> {
        if let Some(format) = &self.output.format {
            if OutputFormat::from_arg(format).is_none() {
                return Err(HubError::Config(format!(
                    "Invalid format \"{format}\". Valid formats: {}",
                    OutputFormat::NAMES.join(", ")
                )));
            }
        }

        if self.hub.timeout_seconds == 0 || self.hub.timeout_seconds > 300 {
            return Err(HubError::Config(
                "Timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        if self.watch.interval_seconds < MIN_WATCH_INTERVAL_SECS {
            return Err(HubError::Config(
                "Watch interval must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }
}
