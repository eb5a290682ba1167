// Runtime client configuration
//
// Carries credentials and the target environment. Built once, never
// mutated, never touches disk; `cityscan-config` produces these from
// profiles.

use secrecy::SecretString;

use crate::environment::Environment;
use crate::error::Error;

/// Immutable settings for a `CityScanClient`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Sent as the `ApiKey` header on every request.
    pub api_key: SecretString,
    /// Only needed by report generation.
    pub client_key: Option<SecretString>,
    pub environment: Environment,
}

impl ClientConfig {
    /// Build a config from an untyped environment name.
    ///
    /// Fails immediately if `environment` is not `prod` or `preprod`.
    pub fn new(api_key: impl Into<String>, environment: &str) -> Result<Self, Error> {
        let environment = environment.parse()?;
        Ok(Self::for_environment(api_key, environment))
    }

    pub fn for_environment(api_key: impl Into<String>, environment: Environment) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            client_key: None,
            environment,
        }
    }

    /// Attach the client key used by `report`.
    pub fn with_client_key(mut self, client_key: impl Into<String>) -> Self {
        self.client_key = Some(SecretString::from(client_key.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn new_resolves_environment() {
        let config = ClientConfig::new("key", "preprod").unwrap();
        assert_eq!(config.environment, Environment::Preprod);
        assert_eq!(config.api_key.expose_secret(), "key");
        assert!(config.client_key.is_none());
    }

    #[test]
    fn new_fails_fast_on_unknown_environment() {
        let err = ClientConfig::new("key", "staging").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = ClientConfig::new("super-secret-key", "prod")
            .unwrap()
            .with_client_key("client-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(!debug.contains("client-secret"));
    }
}
