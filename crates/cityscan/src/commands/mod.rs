//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod activate;
pub mod config_cmd;
pub mod correct;
pub mod lifecycle;
pub mod list;
pub mod man;

use cityscan_api::{AddressId, AddressRef, CityScanClient, GpsPosition, RoadAddress};

use crate::cli::{Command, GlobalOpts, GpsArgs, RoadArgs, TargetArgs};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &CityScanClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Activate(args) => activate::handle(client, args, global).await,
        Command::Correct(args) => correct::handle(client, args, global).await,
        Command::Deactivate(target) => lifecycle::deactivate(client, &target, global).await,
        Command::Reactivate(args) => lifecycle::reactivate(client, args, global).await,
        Command::Report(target) => lifecycle::report(client, &target, global).await,
        Command::List(args) => list::handle(client, args, global).await,
        // Handled before a client is built
        Command::Config(_) | Command::Completions(_) | Command::Man(_) => unreachable!(),
    }
}

// ── Argument conversion ─────────────────────────────────────────────

/// CityScan ids are numeric when they print back unchanged as a number
/// (`42`, not `007`); external ids are always the caller's text.
pub(crate) fn address_id(raw: &str, external: bool) -> AddressId {
    if external {
        return AddressId::from(raw);
    }
    raw.parse::<u64>()
        .ok()
        .filter(|n| n.to_string() == raw)
        .map_or_else(|| AddressId::from(raw), AddressId::from)
}

pub(crate) fn target(args: &TargetArgs) -> AddressRef {
    AddressRef::new(address_id(&args.id, args.external), args.external)
}

pub(crate) fn road(args: RoadArgs) -> RoadAddress {
    RoadAddress::new(args.road, args.postal_code, args.city)
}

pub(crate) fn gps(args: &GpsArgs) -> Result<GpsPosition, CliError> {
    Ok(GpsPosition::new(args.latitude, args.longitude)?)
}
