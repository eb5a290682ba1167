// CityScan HTTP client
//
// Wraps `reqwest::Client` with environment-based URL construction, the
// `ApiKey` header, per-request timeouts and envelope unwrapping. Endpoint
// methods live in `address.rs`; this module only deals with transport
// mechanics.

use reqwest::header::HeaderValue;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::requests::ApiRequest;
use crate::transport::TransportConfig;

/// Authentication header carrying the API key (`ApiKey`; names are
/// case-insensitive and sent lowercase).
pub const API_KEY_HEADER: &str = "apikey";

/// Async client for the CityScan address API.
///
/// Holds only immutable configuration and a pooled `reqwest::Client`, so a
/// single instance can serve concurrent calls from many tasks. Every method
/// issues exactly one HTTP request; nothing is retried.
#[derive(Debug, Clone)]
pub struct CityScanClient {
    http: reqwest::Client,
    base_url: Url,
    config: ClientConfig,
    transport: TransportConfig,
    api_key: HeaderValue,
}

impl CityScanClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `config.environment` with default timeouts.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Self::with_transport(config, &TransportConfig::default())
    }

    /// Build a client for `config.environment` with custom timeouts.
    pub fn with_transport(
        config: ClientConfig,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = config.environment.base_url()?;
        Self::with_base_url(config, base_url, transport)
    }

    /// Build a client against an arbitrary API root (mock servers, proxies).
    ///
    /// `base_url` should point at the API root; a trailing slash is added if
    /// missing so relative endpoint paths join below it.
    pub fn with_base_url(
        config: ClientConfig,
        base_url: Url,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(config, http, base_url, transport.clone())
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// The caller's client keeps its own defaults; the `ApiKey` header and
    /// per-request timeouts are still applied to every request.
    pub fn from_reqwest(
        config: ClientConfig,
        http: reqwest::Client,
        base_url: Url,
        transport: TransportConfig,
    ) -> Result<Self, Error> {
        let api_key = api_key_value(&config)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            config,
            transport,
            api_key,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative endpoint path onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request execution ────────────────────────────────────────────

    /// Send one request and return the envelope's `content`.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value, Error> {
        let url = self.url(request.path)?;
        let timeout = self.transport.resolve(request.timeout);
        debug!(method = %request.method, %url, ?timeout, "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(API_KEY_HEADER, self.api_key.clone())
            .timeout(timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(%status, bytes = body.len(), "received response");

        Envelope::parse(&body)
    }

    /// The configured client key, required by report generation.
    pub(crate) fn client_key(&self) -> Result<&str, Error> {
        self.config
            .client_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .ok_or_else(|| Error::configuration("a client key is required to generate reports"))
    }
}

fn api_key_value(config: &ClientConfig) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(config.api_key.expose_secret())
        .map_err(|e| Error::configuration(format!("invalid API key header value: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
