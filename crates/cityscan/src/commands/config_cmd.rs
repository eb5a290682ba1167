//! Config subcommand handlers.

use serde_json::Value;

use cityscan_api::Environment;
use cityscan_config::{self as config, Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, ConfigInitArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";
const SECRET_FIELDS: [&str; 2] = ["api_key", "client_key"];

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            output::emit(global.output, &redacted(&cfg)?, global.quiet)
        }

        ConfigCommand::Init(init) => init_profile(&init, global),
    }
}

/// Add (or with `--force`, replace) a profile built from the global flags.
fn init_profile(args: &ConfigInitArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();
    let mut cfg = config::load_config()?;
    let name = global.profile.clone().unwrap_or_else(|| "default".into());

    if cfg.profiles.contains_key(&name) && !args.force {
        return Err(CliError::Validation {
            field: "profile".into(),
            reason: format!(
                "'{name}' already exists in {}; pass --force to replace it",
                path.display()
            ),
        });
    }

    if let Some(env) = global.environment.as_deref() {
        env.parse::<Environment>()?;
    }

    // A key read from an env var at runtime is never written to disk.
    let api_key = if args.api_key_env.is_some() {
        None
    } else {
        global.api_key.clone()
    };
    let client_key = if args.client_key_env.is_some() {
        None
    } else {
        global.client_key.clone()
    };
    if api_key.is_none() && args.api_key_env.is_none() {
        return Err(CliError::NoCredentials { profile: name });
    }

    let profile = Profile {
        environment: global.environment.clone(),
        api_key,
        api_key_env: args.api_key_env.clone(),
        client_key,
        client_key_env: args.client_key_env.clone(),
        timeout: global.timeout,
        report_timeout: global.report_timeout,
    };
    cfg.profiles.insert(name.clone(), profile);
    if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
        cfg.default_profile = Some(name.clone());
    }

    config::save_config_to(&cfg, &path)?;

    if !global.quiet {
        eprintln!("Profile '{name}' written to {}", path.display());
    }
    Ok(())
}

/// The loaded config as a tree, with plaintext secrets masked.
fn redacted(cfg: &Config) -> Result<Value, CliError> {
    let mut tree = serde_json::to_value(cfg).map_err(|e| CliError::Render {
        message: e.to_string(),
    })?;
    if let Some(profiles) = tree.get_mut("profiles").and_then(Value::as_object_mut) {
        for profile in profiles.values_mut().filter_map(Value::as_object_mut) {
            for field in SECRET_FIELDS {
                if let Some(value) = profile.get_mut(field).filter(|v| !v.is_null()) {
                    *value = Value::from(REDACTED);
                }
            }
        }
    }
    Ok(tree)
}
