// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::providers::Provider;
use eyre::{eyre, Context};
use raffle_tools::{
    core::{
        artifact::Artifacts,
        deployment::{record::DeploymentStore, RAFFLE_CONTRACT},
        verification::etherscan::{EtherscanVerifier, API_KEY_ENV},
    },
    ops,
};

use crate::{
    common_args::{NetworkArgs, ProviderArgs},
    error::RaffleDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Name of the recorded contract to verify.
    #[arg(long, default_value = RAFFLE_CONTRACT)]
    contract: String,

    #[command(flatten)]
    network: NetworkArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> RaffleDeployResult {
    let config = args.network.load_config()?;
    let network = match args.network.network() {
        // A named network does not need the endpoint.
        Some(id) => config.resolve(id)?,
        None => {
            let provider = args.provider.build_provider().await?;
            let chain_id = provider
                .get_chain_id()
                .await
                .wrap_err("could not read the endpoint's chain id")?;
            args.network.resolve(&config, chain_id)?
        }
    };

    let artifacts = Artifacts::new(&config.artifacts_dir);
    let store = DeploymentStore::new(&config.deployments_dir, &network.name);
    let verifier = EtherscanVerifier::from_env(network.chain_id(), artifacts.clone())
        .ok_or_else(|| eyre!("{API_KEY_ENV} is not set"))?;
    ops::verify(&args.contract, &network, &store, &artifacts, &verifier).await?;
    Ok(())
}
