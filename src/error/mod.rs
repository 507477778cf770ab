//! Error types for cch-statusline.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! - **Validation**: bad command-line input, raised before any network activity
//! - **Authentication**: the Hub rejected the login
//! - **State**: an operation was attempted before login
//! - **Fetch**: the Hub refused or failed the data request, or the caller's key is absent
//! - **Network**: transport failures and timeouts
//! - **Configuration**: config file parsing or validation
//! - **Internal**: I/O, serialization and unclassified failures
//!
//! Each error has a stable error code (e.g., `CCH-A001`) for programmatic handling.

pub mod suggestions;

use thiserror::Error;

pub use suggestions::FixSuggestion;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid command-line input.
    Validation,
    /// Login rejected by the Hub.
    Authentication,
    /// Client used in the wrong state.
    State,
    /// Data request failed or returned unusable data.
    Fetch,
    /// Transport issues (timeout, connection refused, DNS).
    Network,
    /// Configuration issues (parse errors, invalid values).
    Configuration,
    /// Internal errors (bugs, unexpected state, unclassified).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Validation => "Validation error",
            Self::Authentication => "Authentication error",
            Self::State => "State error",
            Self::Fetch => "Fetch error",
            Self::Network => "Network error",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Validation => "V",
            Self::Authentication => "A",
            Self::State => "S",
            Self::Fetch => "F",
            Self::Network => "N",
            Self::Configuration => "C",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
///
/// Every failure exits with 1; watch mode only exits on interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Validation or pipeline failure
    GeneralError = 1,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Main error type for cch-statusline operations.
#[derive(Error, Debug)]
pub enum HubError {
    // ==========================================================================
    // Validation errors
    // ==========================================================================
    /// Invalid or missing command-line input.
    #[error("{0}")]
    Validation(String),

    // ==========================================================================
    // Authentication / state errors
    // ==========================================================================
    /// The Hub rejected the login request.
    #[error("Login failed: {reason}")]
    AuthFailed {
        status_code: Option<u16>,
        reason: String,
    },

    /// A data request was attempted before a successful login.
    #[error("Not authenticated. Call login() first.")]
    NotAuthenticated,

    // ==========================================================================
    // Fetch errors
    // ==========================================================================
    /// The Hub refused or failed the data request.
    #[error("Failed to fetch user data: {reason}")]
    FetchFailed {
        status_code: Option<u16>,
        reason: String,
    },

    /// The caller's API key is not present in the returned account data.
    #[error("Key not found in user data")]
    KeyNotFound,

    /// The response body did not match the expected schema.
    #[error("failed to parse response: {0}")]
    ParseResponse(String),

    // ==========================================================================
    // Network errors
    // ==========================================================================
    /// Request timed out.
    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    // ==========================================================================
    // Configuration errors
    // ==========================================================================
    /// Configuration file missing values, malformed, or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    // ==========================================================================
    // Internal errors
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HubError {
    /// Map error to exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::GeneralError
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::AuthFailed { .. } => ErrorCategory::Authentication,
            Self::NotAuthenticated => ErrorCategory::State,
            Self::FetchFailed { .. } | Self::KeyNotFound | Self::ParseResponse(_) => {
                ErrorCategory::Fetch
            }
            Self::Timeout(_) | Self::Network(_) => ErrorCategory::Network,
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `CCH-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "CCH-V001",
            Self::AuthFailed { .. } => "CCH-A001",
            Self::NotAuthenticated => "CCH-S001",
            Self::FetchFailed { .. } => "CCH-F001",
            Self::KeyNotFound => "CCH-F002",
            Self::ParseResponse(_) => "CCH-F003",
            Self::Timeout(_) => "CCH-N001",
            Self::Network(_) => "CCH-N099",
            Self::Config(_) => "CCH-C001",
            Self::Io(_) => "CCH-X001",
            Self::Json(_) => "CCH-X002",
            Self::Other(_) => "CCH-X099",
        }
    }

    /// Returns the HTTP status attached to this error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::AuthFailed { status_code, .. } | Self::FetchFailed { status_code, .. } => {
                *status_code
            }
            _ => None,
        }
    }

    /// Returns actionable fix suggestions for this error.
    #[must_use]
    pub fn fix_suggestions(&self) -> Vec<FixSuggestion> {
        match self {
            Self::Validation(msg) => suggestions::validation_suggestions(msg),
            Self::AuthFailed { status_code, .. } => suggestions::auth_failed_suggestions(*status_code),
            Self::NotAuthenticated => vec![FixSuggestion::new(
                vec![],
                "The Hub client was used before a successful login. This is a bug.",
            )],
            Self::FetchFailed { status_code, reason } => {
                suggestions::fetch_failed_suggestions(*status_code, reason)
            }
            Self::KeyNotFound => suggestions::key_not_found_suggestions(),
            Self::ParseResponse(msg) => vec![FixSuggestion::new(
                vec![],
                format!("The Hub response was not understood: {msg}. The Hub API may have changed."),
            )],
            Self::Timeout(seconds) => suggestions::timeout_suggestions(*seconds),
            Self::Network(msg) => suggestions::network_suggestions(msg),
            Self::Config(msg) => suggestions::config_suggestions(msg),
            Self::Io(err) => vec![FixSuggestion::new(
                vec![],
                format!("I/O error: {err}. Check file permissions and available disk space."),
            )],
            Self::Json(err) => vec![FixSuggestion::new(
                vec![],
                format!("JSON error: {err}. The data may be corrupted or in an unexpected format."),
            )],
            Self::Other(err) => vec![FixSuggestion::new(
                vec![],
                format!("Unexpected error: {err}. Please report this issue."),
            )],
        }
    }
}

/// Result type alias for cch-statusline operations.
pub type Result<T> = std::result::Result<T, HubError>;

// =============================================================================
// Tests
// =============================================================================
