// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use raffle_tools::ops;

use crate::{common_args::NetworkArgs, error::RaffleDeployResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    network: NetworkArgs,
}

pub fn exec(args: Args) -> RaffleDeployResult {
    let config = args.network.load_config()?;
    log::info!(
        "live networks wait for {} confirmation(s), up to {}s",
        config.verification_block_confirmations,
        config.confirmation_timeout.as_secs()
    );
    ops::print_networks(&config);
    Ok(())
}
