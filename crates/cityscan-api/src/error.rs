use thiserror::Error;

/// Top-level error type for the `cityscan-api` crate.
///
/// Every facade call either returns the decoded `content` or exactly one of
/// these. Nothing is retried or logged here; the caller decides.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Invalid client configuration (unknown environment, missing client
    /// key, unusable API key header value).
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A caller-supplied value the service cannot represent, rejected
    /// before any request is sent.
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (timeout, connection refused, TLS failure).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Envelope ────────────────────────────────────────────────────
    /// The body did not decode to the `{ status, ... }` envelope, or the
    /// `content` did not have the shape the endpoint promises.
    #[error("Protocol error: {message}")]
    Protocol { message: String, body: String },

    /// The envelope decoded but `status` reported a failure.
    #[error("CityScan API error{}: {message}", code_suffix(.code))]
    Api { message: String, code: Option<i64> },
}

#[allow(clippy::ref_option)]
fn code_suffix(code: &Option<i64>) -> String {
    code.map(|c| format!(" ({c})")).unwrap_or_default()
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn protocol(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
            body: body.into(),
        }
    }

    /// Returns `true` if a fresh attempt might succeed.
    ///
    /// The client itself never retries; this is a hint for callers that do.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the request hit its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// The server-supplied error code, for `Api` errors that carry one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// The server-supplied message, for `Api` errors.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_code() {
        let err = Error::Api {
            message: "Invalid postal code".into(),
            code: Some(400),
        };
        assert_eq!(err.to_string(), "CityScan API error (400): Invalid postal code");
        assert_eq!(err.api_code(), Some(400));
        assert_eq!(err.api_message(), Some("Invalid postal code"));
    }

    #[test]
    fn api_error_display_without_code() {
        let err = Error::Api {
            message: "Unknown address".into(),
            code: None,
        };
        assert_eq!(err.to_string(), "CityScan API error: Unknown address");
    }

    #[test]
    fn protocol_error_is_not_transient() {
        let err = Error::protocol("no response", "{}");
        assert!(!err.is_transient());
        assert!(!err.is_timeout());
        assert_eq!(err.api_code(), None);
    }
}
