// Shared transport configuration for building the reqwest::Client.
//
// One client is built per `CityScanClient` and reused for its lifetime.
// Per-request timeouts are resolved here so the report endpoint can run
// longer than everything else.

use std::time::Duration;

use crate::error::Error;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for report generation, which renders documents server-side.
pub const REPORT_TIMEOUT: Duration = Duration::from_secs(120);

/// Which timeout budget a request runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestTimeout {
    /// Ordinary JSON round-trip.
    #[default]
    Standard,
    /// Server-side document rendering (reports).
    Rendering,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub report_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            report_timeout: REPORT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Concrete duration for a request's timeout class.
    pub fn resolve(&self, timeout: RequestTimeout) -> Duration {
        match timeout {
            RequestTimeout::Standard => self.timeout,
            RequestTimeout::Rendering => self.report_timeout,
        }
    }

    /// Build the pooled `reqwest::Client` shared by every request.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("cityscan-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))
    }
}
