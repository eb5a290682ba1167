//! Clap derive structures for the `cityscan` CLI.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cityscan -- manage monitored addresses on the CityScan API
#[derive(Debug, Parser)]
#[command(
    name = "cityscan",
    version,
    about = "Manage CityScan address monitoring from the command line",
    long_about = "Activate, correct and deactivate monitored addresses, request\n\
        reports and list addresses by lifecycle state on the CityScan API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "CITYSCAN_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Target environment: prod or preprod (overrides profile)
    #[arg(long, short = 'e', env = "CITYSCAN_ENVIRONMENT", global = true)]
    pub environment: Option<String>,

    /// API key sent with every request
    #[arg(long, env = "CITYSCAN_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Client key, required by `report`
    #[arg(long, env = "CITYSCAN_CLIENT_KEY", global = true, hide_env_values = true)]
    pub client_key: Option<String>,

    /// API root override (mock servers, proxies)
    #[arg(long, env = "CITYSCAN_BASE_URL", global = true, hide = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CITYSCAN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Report generation timeout in seconds
    #[arg(long, env = "CITYSCAN_REPORT_TIMEOUT", global = true)]
    pub report_timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CITYSCAN_OUTPUT",
        default_value = "json",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start monitoring an address
    #[command(alias = "act")]
    Activate(ActivateArgs),

    /// Correct the location of an activated address
    Correct(CorrectArgs),

    /// Stop monitoring an address
    Deactivate(TargetArgs),

    /// Resume monitoring deactivated addresses
    Reactivate(ReactivateArgs),

    /// Request the report for an address
    Report(TargetArgs),

    /// List addresses by lifecycle state
    #[command(alias = "ls")]
    List(ListArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Render man pages
    Man(ManArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// One address, by CityScan id or by your own id.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Address id
    pub id: String,

    /// Treat ID as your external id instead of the CityScan id
    #[arg(long, short = 'x')]
    pub external: bool,
}

#[derive(Debug, Args)]
pub struct RoadArgs {
    /// Street and number
    pub road: String,

    /// Postal code
    pub postal_code: String,

    /// City name
    pub city: String,
}

#[derive(Debug, Args)]
pub struct GpsArgs {
    /// Latitude in decimal degrees
    #[arg(allow_negative_numbers = true, value_parser = parse_coordinate)]
    pub latitude: f64,

    /// Longitude in decimal degrees
    #[arg(allow_negative_numbers = true, value_parser = parse_coordinate)]
    pub longitude: f64,
}

/// Decimal degrees. `NaN` and `inf` parse as `f64` but have no JSON form.
fn parse_coordinate(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("'{raw}': {e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{raw}' is not a finite number"))
    }
}

// ── Activate ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ActivateArgs {
    #[command(subcommand)]
    pub command: ActivateCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActivateCommand {
    /// Activate from road, postal code and city
    Road {
        #[command(flatten)]
        address: RoadArgs,

        /// Your own id for this address
        #[arg(long)]
        external_id: Option<String>,
    },

    /// Activate from GPS coordinates
    Gps {
        #[command(flatten)]
        position: GpsArgs,

        /// Your own id for this address
        #[arg(long)]
        external_id: Option<String>,
    },
}

// ── Correct ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CorrectArgs {
    #[command(subcommand)]
    pub command: CorrectCommand,
}

#[derive(Debug, Subcommand)]
pub enum CorrectCommand {
    /// Replace road, postal code and city
    Road {
        #[command(flatten)]
        address: RoadArgs,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Replace GPS coordinates
    Gps {
        #[command(flatten)]
        position: GpsArgs,

        #[command(flatten)]
        target: TargetArgs,
    },
}

// ── Reactivate ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReactivateArgs {
    /// Address ids
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Treat the ids as your external ids
    #[arg(long, short = 'x')]
    pub external: bool,
}

// ── List ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(subcommand)]
    pub command: ListCommand,
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Addresses currently monitored
    Active,
    /// Addresses activated in a date range
    Activated(DateArgs),
    /// Addresses billed in a date range
    Billed(DateArgs),
    /// Addresses deactivated in a date range
    Deactivated(DateArgs),
    /// Every address on the account
    All,
}

#[derive(Debug, Args)]
pub struct DateArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,
    /// Print the loaded configuration, secrets redacted
    Show,
    /// Write a profile to the config file
    Init(ConfigInitArgs),
}

#[derive(Debug, Args)]
pub struct ConfigInitArgs {
    /// Read the API key from this environment variable at runtime
    #[arg(long)]
    pub api_key_env: Option<String>,

    /// Read the client key from this environment variable at runtime
    #[arg(long)]
    pub client_key_env: Option<String>,

    /// Replace an existing profile of the same name
    #[arg(long, short = 'f')]
    pub force: bool,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Man ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ManArgs {
    /// Write one page per command into this directory instead of printing
    /// the top-level page
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}
