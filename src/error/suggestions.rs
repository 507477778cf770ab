//! Fix suggestion database for cch-statusline errors.
//!
//! Maps error types to actionable commands and short explanations.

// =============================================================================
// Fix Suggestion Types
// =============================================================================

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    /// Commands to try, copy-paste ready for the terminal.
    pub commands: Vec<String>,

    /// Explanation of why this error occurred.
    pub context: String,

    /// Tips to prevent this error in the future.
    pub prevention: Option<String>,
}

impl FixSuggestion {
    /// Creates a new fix suggestion with required fields.
    #[must_use]
    pub fn new(commands: Vec<String>, context: impl Into<String>) -> Self {
        Self {
            commands,
            context: context.into(),
            prevention: None,
        }
    }

    /// Builder: adds prevention tips.
    #[must_use]
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }
}

// =============================================================================
// Suggestion Generators
// =============================================================================

/// Suggestions for invalid command-line input.
#[must_use]
pub fn validation_suggestions(message: &str) -> Vec<FixSuggestion> {
    let lower = message.to_lowercase();
    if lower.contains("api key") {
        vec![FixSuggestion::new(
            vec![
                "cch-statusline -k <api-key>".to_string(),
                "export CCH_API_KEY=<api-key>".to_string(),
            ],
            "Use -k or set CCH_API_KEY environment variable",
        )]
    } else if lower.contains("url") {
        vec![FixSuggestion::new(
            vec![
                "cch-statusline -u https://hub.example.com".to_string(),
                "export CCH_URL=https://hub.example.com".to_string(),
            ],
            "Use -u or set CCH_URL environment variable",
        )]
    } else if lower.contains("format") {
        vec![FixSuggestion::new(
            vec!["cch-statusline -f detailed".to_string()],
            "Valid formats: statusline, detailed, json",
        )]
    } else {
        vec![FixSuggestion::new(
            vec!["cch-statusline --help".to_string()],
            message.to_string(),
        )]
    }
}

/// Suggestions for a rejected login.
#[must_use]
pub fn auth_failed_suggestions(status_code: Option<u16>) -> Vec<FixSuggestion> {
    let context = match status_code {
        Some(401 | 403) => "The Hub does not accept this API key.".to_string(),
        Some(code) => format!("The Hub login endpoint answered HTTP {code}."),
        None => "The Hub reported the login as unsuccessful.".to_string(),
    };
    vec![
        FixSuggestion::new(vec!["echo $CCH_API_KEY".to_string()], context)
            .with_prevention("Copy the full key from the Hub dashboard; keys are matched exactly."),
    ]
}

/// Suggestions for a failed data request.
#[must_use]
pub fn fetch_failed_suggestions(status_code: Option<u16>, reason: &str) -> Vec<FixSuggestion> {
    let context = match status_code {
        Some(code) if code >= 500 => {
            format!("The Hub had an internal problem (HTTP {code}). Try again shortly.")
        }
        Some(code) => format!("The Hub refused the request (HTTP {code})."),
        None => format!("The Hub reported an error: {reason}"),
    };
    vec![FixSuggestion::new(
        vec!["cch-statusline -f detailed -v".to_string()],
        context,
    )]
}

/// Suggestions when the caller's key is missing from the account data.
#[must_use]
pub fn key_not_found_suggestions() -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![],
        "The Hub returned account data, but none of its keys equals the supplied API key. \
         The key may have been deleted or the Hub does not expose full key strings.",
    )]
}

/// Suggestions for timeouts.
#[must_use]
pub fn timeout_suggestions(seconds: u64) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("cch-statusline --timeout {}", seconds.saturating_mul(2))],
            format!("The Hub did not answer within {seconds}s."),
        )
        .with_prevention("Raise `timeout_seconds` under [hub] in config.toml for slow networks."),
    ]
}

/// Suggestions for transport failures.
#[must_use]
pub fn network_suggestions(message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["curl -sS -X POST $CCH_URL/api/auth/login".to_string()],
        format!("Network error: {message}. Check the Hub URL and your connection."),
    )]
}

/// Suggestions for configuration problems.
#[must_use]
pub fn config_suggestions(message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["echo $CCH_CONFIG".to_string()],
        format!("Configuration error: {message}"),
    )]
}
