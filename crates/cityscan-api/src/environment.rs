// Deployment environments
//
// The service runs in two places. Each maps to a fixed base URL that is
// resolved once, when the client is built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Which CityScan deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production: `https://www.cityscan.fr/api/`
    #[default]
    Prod,
    /// Pre-production sandbox: `https://preprod.cityscan.fr/api/`
    Preprod,
}

impl Environment {
    pub const ALL: [Self; 2] = [Self::Prod, Self::Preprod];

    /// The wire name used in configuration (`prod` / `preprod`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Preprod => "preprod",
        }
    }

    /// The API root as written, always ending with `/api/`.
    pub fn base_url_str(self) -> &'static str {
        match self {
            Self::Prod => "https://www.cityscan.fr/api/",
            Self::Preprod => "https://preprod.cityscan.fr/api/",
        }
    }

    /// The API root for this environment, parsed.
    pub fn base_url(self) -> Result<Url, Error> {
        Ok(Url::parse(self.base_url_str())?)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| {
                Error::configuration(format!(
                    "unknown environment '{s}', it must be one of the following values: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Prod);
        assert_eq!("preprod".parse::<Environment>().unwrap(), Environment::Preprod);
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["", "Prod", "PROD", "staging", "production", " prod", "pre-prod", "dev"] {
            let err = raw.parse::<Environment>().unwrap_err();
            assert!(
                matches!(err, Error::Configuration { .. }),
                "expected Configuration error for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn error_lists_accepted_values() {
        let err = "staging".parse::<Environment>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("staging"));
        assert!(msg.contains("prod, preprod"));
    }

    #[test]
    fn base_urls_are_fixed() {
        assert_eq!(
            Environment::Prod.base_url().unwrap().as_str(),
            "https://www.cityscan.fr/api/"
        );
        assert_eq!(
            Environment::Preprod.base_url().unwrap().as_str(),
            "https://preprod.cityscan.fr/api/"
        );
    }

    #[test]
    fn every_base_url_parses_to_itself() {
        for env in Environment::ALL {
            let url = env.base_url().unwrap();
            assert_eq!(url.as_str(), env.base_url_str());
            assert!(url.path().ends_with("/api/"), "{env}: {url}");
        }
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Environment::Preprod).unwrap();
        assert_eq!(json, "\"preprod\"");
        let back: Environment = serde_json::from_str("\"prod\"").unwrap();
        assert_eq!(back, Environment::Prod);
    }
}
