// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use eyre::bail;

use crate::{
    core::{
        artifact::Artifacts,
        deployment::record::DeploymentStore,
        network::ResolvedNetwork,
        verification::{SourceVerifier, VerificationStatus},
    },
    utils::color::DebugColor,
};

/// Re-submits a recorded deployment of contract `name` for source verification.
pub async fn verify(
    name: &str,
    network: &ResolvedNetwork,
    store: &DeploymentStore,
    artifacts: &Artifacts,
    verifier: &impl SourceVerifier,
) -> eyre::Result<VerificationStatus> {
    if network.class.is_simulated() {
        bail!("{} is a simulated network, there is nothing to verify", network.name);
    }
    let saved = store.require(name)?;
    if saved.chain_id != network.chain_id() {
        bail!(
            "record for {name} was written for chain id {}, not {}",
            saved.chain_id,
            network.chain_id()
        );
    }

    let args = artifacts.find(name)?.parse_constructor_args(&saved.args)?;
    greyln!("verifying {name} at {}", saved.address.debug_lavender());
    let status = verifier.verify(name, saved.address, &args).await?;
    match status {
        VerificationStatus::AlreadyVerified => mintln!("{name} is already verified"),
        _ => mintln!("verified {name}"),
    }
    Ok(status)
}
