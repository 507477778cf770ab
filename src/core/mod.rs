//! Hub client, data models and statistics derivation.

pub mod client;
pub mod http;
pub mod logging;
pub mod models;
pub mod stats;

pub use client::HubClient;
pub use models::{
    AccountRecord, KeyRecord, LimitWindow, LoginResponse, ModelStat, NormalizedStats,
    UsersResponse,
};
pub use stats::{StatsAggregator, attribute_model, derive_stats, resolve_key};
