//! Storage for configuration and the in-process stats cache.

pub mod cache;
pub mod config;
pub mod paths;

pub use cache::{DEFAULT_TTL, TtlCache};
pub use config::{
    Config, ConfigSource, ConfigSources, ENV_API_KEY, ENV_API_KEY_FALLBACK, ENV_CACHE_TTL,
    ENV_CONFIG, ENV_FORMAT, ENV_NO_COLOR, ENV_NO_COLOR_STD, ENV_TIMEOUT, ENV_URL,
    ENV_URL_FALLBACK, ResolvedConfig,
};
pub use paths::AppPaths;
