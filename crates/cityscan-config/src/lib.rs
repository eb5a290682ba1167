//! Shared configuration for CityScan tools.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to `cityscan_api::ClientConfig`. The CLI merges its flag overrides into a
//! copy of the active profile and translates that through here too.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cityscan_api::{ClientConfig, Environment, TransportConfig};

/// Prefix for environment overrides, e.g. `CITYSCAN_DEFAULTS__TIMEOUT=30`.
pub const ENV_PREFIX: &str = "CITYSCAN_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no {credential} configured for profile '{profile}'")]
    NoCredentials {
        profile: String,
        credential: &'static str,
    },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    Client(#[from] cityscan_api::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named credential profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles.get(name).ok_or_else(|| {
            let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            ConfigError::ProfileNotFound {
                name: name.into(),
                available: if names.is_empty() {
                    "none".into()
                } else {
                    names.join(", ")
                },
            }
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// `prod` or `preprod`.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Report generation timeout in seconds.
    #[serde(default = "default_report_timeout")]
    pub report_timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            timeout: default_timeout(),
            report_timeout: default_report_timeout(),
        }
    }
}

fn default_environment() -> String {
    Environment::default().as_str().into()
}
fn default_timeout() -> u64 {
    cityscan_api::DEFAULT_TIMEOUT.as_secs()
}
fn default_report_timeout() -> u64 {
    cityscan_api::REPORT_TIMEOUT.as_secs()
}

/// A named set of credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Override the default environment.
    pub environment: Option<String>,

    /// API key in plaintext. Prefer `api_key_env`.
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Client key for report generation (plaintext).
    pub client_key: Option<String>,

    /// Environment variable name containing the client key.
    pub client_key_env: Option<String>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override report timeout.
    pub report_timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("fr", "cityscan", "cityscan").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cityscan");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from a specific file, layered over defaults and under the
/// `CITYSCAN_` environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML at `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the API key: `api_key_env` variable first, then plaintext.
fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_secret(profile.api_key_env.as_deref(), profile.api_key.as_deref()).ok_or_else(|| {
        ConfigError::NoCredentials {
            profile: profile_name.into(),
            credential: "API key",
        }
    })
}

/// Resolve the optional client key the same way. Absent is not an error;
/// only report generation needs it.
fn resolve_client_key(profile: &Profile) -> Option<SecretString> {
    resolve_secret(profile.client_key_env.as_deref(), profile.client_key.as_deref())
}

fn resolve_secret(env_name: Option<&str>, plaintext: Option<&str>) -> Option<SecretString> {
    if let Some(val) = env_name.and_then(|name| std::env::var(name).ok()) {
        return Some(SecretString::from(val));
    }
    plaintext.map(|key| SecretString::from(key.to_owned()))
}

/// The environment name a profile resolves to.
fn profile_environment<'a>(profile: &'a Profile, defaults: &'a Defaults) -> &'a str {
    profile.environment.as_deref().unwrap_or(&defaults.environment)
}

/// Timeouts for a profile, falling back to the global defaults.
pub fn profile_transport(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    TransportConfig {
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        report_timeout: Duration::from_secs(
            profile.report_timeout.unwrap_or(defaults.report_timeout),
        ),
    }
}

/// Build a `ClientConfig` from a profile.
///
/// Fails fast on an unknown environment name, then on a missing API key.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let environment: Environment = profile_environment(profile, defaults).parse()?;
    let api_key = resolve_api_key(profile, profile_name)?;

    Ok(ClientConfig {
        api_key,
        client_key: resolve_client_key(profile),
        environment,
    })
}
