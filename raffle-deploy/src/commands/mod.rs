// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::RaffleDeployResult;

mod deploy;
mod networks;
mod verify;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Provision a VRF subscription and deploy the raffle
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Print the configured networks
    #[clap(visible_alias = "n")]
    Networks(networks::Args),
    /// Submit a recorded deployment for source verification
    Verify(verify::Args),
}

pub async fn exec(cmd: Command) -> RaffleDeployResult {
    match cmd {
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Networks(args) => networks::exec(args),
        Command::Verify(args) => verify::exec(args).await,
    }
}
