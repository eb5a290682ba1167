//! Deactivate, reactivate and report handlers.
//!
//! These endpoints return loosely shaped `content`; it is printed as-is.

use cityscan_api::{AddressRefs, CityScanClient};

use crate::cli::{GlobalOpts, ReactivateArgs, TargetArgs};
use crate::error::CliError;
use crate::output;

pub async fn deactivate(
    client: &CityScanClient,
    target: &TargetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let content = client.deactivate(&super::target(target)).await?;
    if !global.quiet {
        eprintln!("Address {} deactivated", target.id);
    }
    output::emit(global.output, &content, global.quiet)
}

pub async fn reactivate(
    client: &CityScanClient,
    args: ReactivateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ids = args
        .ids
        .iter()
        .map(|raw| super::address_id(raw, args.external));
    let content = client
        .reactivate(&AddressRefs::new(ids, args.external))
        .await?;
    if !global.quiet {
        eprintln!("{} address(es) reactivated", args.ids.len());
    }
    output::emit(global.output, &content, global.quiet)
}

pub async fn report(
    client: &CityScanClient,
    target: &TargetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let content = client.report(&super::target(target)).await?;
    output::emit(global.output, &content, global.quiet)
}
