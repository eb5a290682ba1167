//! Activate command handlers.

use cityscan_api::{AddressId, CityScanClient};

use crate::cli::{ActivateArgs, ActivateCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &CityScanClient,
    args: ActivateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let activation = match args.command {
        ActivateCommand::Road {
            address,
            external_id,
        } => {
            let external_id = external_id.map(AddressId::from);
            client
                .activate_by_road(&super::road(address), external_id.as_ref())
                .await?
        }
        ActivateCommand::Gps {
            position,
            external_id,
        } => {
            let external_id = external_id.map(AddressId::from);
            client
                .activate_by_gps(super::gps(&position)?, external_id.as_ref())
                .await?
        }
    };

    output::emit(global.output, &activation, global.quiet)
}
