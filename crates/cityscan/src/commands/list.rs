//! List command handlers.

use cityscan_api::{CityScanClient, DateRange};

use crate::cli::{DateArgs, GlobalOpts, ListArgs, ListCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &CityScanClient,
    args: ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let addresses = match args.command {
        ListCommand::Active => client.list_active().await?,
        ListCommand::Activated(dates) => client.list_activated(&range(&dates)?).await?,
        ListCommand::Billed(dates) => client.list_billed(&range(&dates)?).await?,
        ListCommand::Deactivated(dates) => client.list_deactivated(&range(&dates)?).await?,
        ListCommand::All => client.list_all().await?,
    };

    tracing::info!(count = addresses.len(), "addresses listed");
    output::emit(global.output, &addresses, global.quiet)
}

fn range(dates: &DateArgs) -> Result<DateRange, CliError> {
    if let (Some(start), Some(end)) = (dates.start, dates.end) {
        if start > end {
            return Err(CliError::Validation {
                field: "--start/--end".into(),
                reason: format!("start {start} is after end {end}"),
            });
        }
    }
    Ok(DateRange::new(dates.start, dates.end))
}
