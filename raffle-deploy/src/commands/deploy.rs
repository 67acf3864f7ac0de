// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::providers::{Provider, WalletProvider};
use eyre::{eyre, Context};
use raffle_tools::{
    core::{
        artifact::Artifacts,
        context::RunContext,
        coordinator::RpcCoordinator,
        deployment::{record::DeploymentStore, request::ArtifactDeployer},
        mocks,
        network::NetworkClass,
        verification::etherscan::EtherscanVerifier,
    },
    ops,
};

use crate::{
    common_args::{AuthArgs, NetworkArgs, ProviderArgs},
    error::RaffleDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Do not write a deployment record.
    #[arg(long)]
    no_record: bool,

    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    network: NetworkArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> RaffleDeployResult {
    let config = args.network.load_config()?;
    let provider = args.provider.build_provider_with_wallet(&args.auth).await?;
    let chain_id = provider
        .get_chain_id()
        .await
        .wrap_err("could not read the endpoint's chain id")?;
    let network = args.network.resolve(&config, chain_id)?;
    let deployer = provider.default_signer_address();

    let artifacts = Artifacts::new(&config.artifacts_dir);
    let store = DeploymentStore::new(&config.deployments_dir, &network.name);
    let contracts = ArtifactDeployer::builder()
        .provider(&provider)
        .artifacts(artifacts.clone())
        .timeout(config.confirmation_timeout)
        .build();

    let (coordinator, verifier) = match network.class {
        NetworkClass::Simulated => {
            let coordinator =
                mocks::ensure_coordinator(&network, &contracts, deployer, &store).await?;
            (coordinator, None)
        }
        NetworkClass::Live => {
            let coordinator = network
                .profile
                .vrf_coordinator
                .ok_or_else(|| eyre!("{} has no vrf-coordinator", network.name))?;
            (coordinator, EtherscanVerifier::from_env(chain_id, artifacts))
        }
    };

    let ctx = RunContext::builder()
        .confirmations(config.confirmation_policy(network.class))
        .network(network)
        .deployer(deployer)
        .coordinator(RpcCoordinator::new(coordinator, &provider))
        .contracts(contracts)
        .verifier(verifier)
        .records((!args.no_record).then_some(store))
        .build();
    ops::deploy(&ctx).await?;
    Ok(())
}
