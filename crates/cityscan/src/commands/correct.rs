//! Correct command handlers.

use cityscan_api::CityScanClient;

use crate::cli::{CorrectArgs, CorrectCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &CityScanClient,
    args: CorrectArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let activation = match args.command {
        CorrectCommand::Road { address, target } => {
            client
                .correct_by_road(&super::road(address), &super::target(&target))
                .await?
        }
        CorrectCommand::Gps { position, target } => {
            client
                .correct_by_gps(super::gps(&position)?, &super::target(&target))
                .await?
        }
    };

    output::emit(global.output, &activation, global.quiet)
}
