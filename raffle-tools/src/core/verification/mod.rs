// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Source verification on a block explorer.
//!
//! Verification is a convenience: callers receive the outcome as a [`Result`] and decide whether a
//! failure matters. The deploy workflow only logs it.

use alloy::{dyn_abi::DynSolValue, primitives::Address};

use crate::core::{
    artifact::ArtifactError,
    context::RunContext,
    deployment::{ConstructorArgs, DeploymentRecord, RAFFLE_CONTRACT},
};

pub mod etherscan;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("verification request rejected: {0}")]
    Rejected(String),
    #[error("verification failed: {0}")]
    Failed(String),
    #[error("verification still pending after {polls} status checks")]
    TimedOut { polls: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    Skipped(SkipReason),
    Verified,
    AlreadyVerified,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    SimulatedNetwork,
    MissingCredential,
}

/// Publishes a deployed contract's source.
#[allow(async_fn_in_trait)]
pub trait SourceVerifier {
    async fn verify(
        &self,
        name: &str,
        address: Address,
        args: &[DynSolValue],
    ) -> Result<VerificationStatus, VerificationError>;
}

/// Submits the raffle for verification when the network is live and a verifier is configured.
pub async fn submit<C, D, V: SourceVerifier>(
    ctx: &RunContext<C, D, V>,
    record: &DeploymentRecord,
    args: &ConstructorArgs,
) -> Result<VerificationStatus, VerificationError> {
    if ctx.network.class.is_simulated() {
        return Ok(VerificationStatus::Skipped(SkipReason::SimulatedNetwork));
    }
    let Some(verifier) = &ctx.verifier else {
        debug!(@grey, "no verification credential, skipping verification");
        return Ok(VerificationStatus::Skipped(SkipReason::MissingCredential));
    };

    info!(@grey, "verifying...");
    verifier
        .verify(RAFFLE_CONTRACT, record.contract_address, &args.values())
        .await
}
