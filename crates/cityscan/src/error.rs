//! CLI error types with miette diagnostics.
//!
//! Maps `cityscan_api::Error` and `ConfigError` into user-facing errors with
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use cityscan_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFIGURATION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const PROTOCOL: i32 = 9;
}

/// Longest slice of a malformed response body echoed back in help text.
const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to CityScan at {url}")]
    #[diagnostic(
        code(cityscan::connection_failed),
        help("Check network access, or pick the other environment with --environment.")
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: cityscan_api::Error,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(cityscan::timeout),
        help("Increase the limit with --timeout, or --report-timeout for reports.")
    )]
    Timeout {
        #[source]
        source: cityscan_api::Error,
    },

    #[error("HTTP request failed")]
    #[diagnostic(code(cityscan::transport))]
    Transport {
        #[source]
        source: cityscan_api::Error,
    },

    // ── Credentials ──────────────────────────────────────────────────
    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(cityscan::no_credentials),
        help(
            "Pass --api-key, set CITYSCAN_API_KEY, or add a profile with:\n\
             cityscan config init --api-key-env MY_CITYSCAN_KEY"
        )
    )]
    NoCredentials { profile: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("CityScan rejected the request{}: {message}", code_suffix(.code))]
    #[diagnostic(code(cityscan::api_error))]
    ApiError { message: String, code: Option<i64> },

    #[error("Unexpected response: {message}")]
    #[diagnostic(code(cityscan::protocol), help("Response body: {body}"))]
    Protocol { message: String, body: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(cityscan::configuration),
        help("Inspect the active settings with: cityscan config show")
    )]
    Configuration { message: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(cityscan::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: cityscan config init --profile {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cityscan::validation))]
    Validation { field: String, reason: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {message}")]
    #[diagnostic(code(cityscan::render))]
    Render { message: String },
}

#[allow(clippy::ref_option)]
fn code_suffix(code: &Option<i64>) -> String {
    code.map(|c| format!(" ({c})")).unwrap_or_default()
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NoCredentials { .. } | Self::ApiError { .. } => exit_code::AUTH,
            Self::Protocol { .. } => exit_code::PROTOCOL,
            Self::Configuration { .. } | Self::ProfileNotFound { .. } => {
                exit_code::CONFIGURATION
            }
            Self::Validation { .. } => exit_code::USAGE,
            Self::Transport { .. } | Self::Io(_) | Self::Render { .. } => exit_code::GENERAL,
        }
    }
}

// ── cityscan_api::Error → CliError ──────────────────────────────────

impl From<cityscan_api::Error> for CliError {
    fn from(err: cityscan_api::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout { source: err };
        }
        if let Some(url) = connect_failure_url(&err) {
            return Self::ConnectionFailed { url, source: err };
        }
        match err {
            cityscan_api::Error::Configuration { message } => Self::Configuration { message },
            cityscan_api::Error::InvalidInput { field, reason } => Self::Validation {
                field: field.into(),
                reason,
            },
            cityscan_api::Error::InvalidUrl(e) => Self::Configuration {
                message: format!("invalid API URL: {e}"),
            },
            cityscan_api::Error::Api { message, code } => Self::ApiError { message, code },
            cityscan_api::Error::Protocol { message, body } => Self::Protocol {
                message,
                body: preview(&body),
            },
            cityscan_api::Error::Transport(e) => Self::Transport {
                source: cityscan_api::Error::Transport(e),
            },
        }
    }
}

fn connect_failure_url(err: &cityscan_api::Error) -> Option<String> {
    match err {
        cityscan_api::Error::Transport(e) if e.is_connect() => Some(
            e.url()
                .map_or_else(|| "(unknown)".into(), ToString::to_string),
        ),
        _ => None,
    }
}

fn preview(body: &str) -> String {
    if body.is_empty() {
        return "(empty)".into();
    }
    let mut out: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    if body.chars().nth(BODY_PREVIEW_CHARS).is_some() {
        out.push_str("...");
    }
    out
}

// ── ConfigError → CliError ──────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile, .. } => Self::NoCredentials { profile },
            ConfigError::ProfileNotFound { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            ConfigError::Client(e) => e.into(),
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Configuration {
                message: other.to_string(),
            },
        }
    }
}
