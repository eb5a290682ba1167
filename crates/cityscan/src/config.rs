//! Profile resolution with CLI flag overrides.
//!
//! `cityscan-config` owns the file format; this module layers `--api-key`,
//! `--environment`, `--timeout` and friends on top and builds the client.

use cityscan_api::{CityScanClient, ClientConfig, TransportConfig};
use cityscan_config::{self as config, Config, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the client for the active profile, flags taking precedence.
pub fn build_client(global: &GlobalOpts) -> Result<CityScanClient, CliError> {
    let cfg = config::load_config()?;
    let (client_config, transport) = resolve(global, &cfg)?;

    tracing::debug!(
        environment = %client_config.environment,
        timeout = ?transport.timeout,
        "client configured"
    );

    match global.base_url.as_deref() {
        Some(raw) => {
            let url = raw.parse::<url::Url>().map_err(|e| CliError::Validation {
                field: "base-url".into(),
                reason: format!("invalid URL '{raw}': {e}"),
            })?;
            Ok(CityScanClient::with_base_url(client_config, url, &transport)?)
        }
        None => Ok(CityScanClient::with_transport(client_config, &transport)?),
    }
}

/// Merge flags over the active profile (or over bare defaults when no
/// profile exists).
pub fn resolve(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(ClientConfig, TransportConfig), CliError> {
    let profile_name = active_profile_name(global, cfg);

    let profile = if global.profile.is_some() {
        // An explicitly requested profile must exist.
        cfg.profile(&profile_name)?.clone()
    } else {
        cfg.profiles.get(&profile_name).cloned().unwrap_or_default()
    };
    let merged = apply_overrides(profile, global);

    let client_config = config::profile_to_client_config(&merged, &profile_name, &cfg.defaults)?;
    let transport = config::profile_transport(&merged, &cfg.defaults);
    Ok((client_config, transport))
}

/// Copy set flags into the profile. A key given as a flag also drops the
/// profile's `*_env` indirection, which would otherwise be read first.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(key) = &global.api_key {
        profile.api_key = Some(key.clone());
        profile.api_key_env = None;
    }
    if let Some(key) = &global.client_key {
        profile.client_key = Some(key.clone());
        profile.client_key_env = None;
    }
    if let Some(environment) = &global.environment {
        profile.environment = Some(environment.clone());
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    if global.report_timeout.is_some() {
        profile.report_timeout = global.report_timeout;
    }
    profile
}
