// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The provisioning run: subscription, deployment, registration, verification.

use std::path::{Path, PathBuf};

use alloy::primitives::TxHash;

use crate::{
    core::{
        context::RunContext,
        coordinator::SubscriptionCoordinator,
        deployment::{
            self,
            record::{DeploymentStore, SavedDeployment},
            ConstructorArgs, ContractDeployer, DeploymentRecord, RAFFLE_CONTRACT,
        },
        registration,
        subscription::{self, Subscription},
        verification::{self, SkipReason, SourceVerifier, VerificationError, VerificationStatus},
    },
    utils::{color::DebugColor, format_eth},
    Result,
};

/// What a successful run produced.
#[derive(Debug)]
pub struct DeploymentOutcome {
    pub subscription: Subscription,
    pub record: DeploymentRecord,
    /// `addConsumer` transaction; simulated networks only.
    pub consumer_tx: Option<TxHash>,
    /// Verification never fails the run, its outcome is kept for the caller.
    pub verification: Result<VerificationStatus, VerificationError>,
    pub record_path: Option<PathBuf>,
}

/// Provisions a subscription and deploys the raffle against it.
///
/// Every step before verification is fatal: the first error aborts the run and nothing already
/// sent on chain is rolled back. Writing the deployment record is not a step: a failed write is
/// only logged.
pub async fn deploy<C, D, V>(ctx: &RunContext<C, D, V>) -> Result<DeploymentOutcome>
where
    C: SubscriptionCoordinator,
    D: ContractDeployer,
    V: SourceVerifier,
{
    info!(
        @grey,
        "deploying to {} (chain id {}, {})",
        ctx.network.name,
        ctx.network.chain_id(),
        ctx.network.class
    );

    let mut subscription = subscription::provision(ctx).await?;
    let args = ConstructorArgs::new(&ctx.network.profile, &subscription);
    let record = deployment::execute(ctx, &args).await?;

    // Registration is attempted before the record is written, and the record is written even
    // when registration fails.
    let registered = registration::register_consumer(ctx, &mut subscription, &record).await;
    let record_path = ctx
        .records
        .as_ref()
        .and_then(|store| save_record(store, ctx.network.chain_id(), &record, &args));
    let consumer_tx = registered?;

    let verification = verification::submit(ctx, &record, &args).await;
    match &verification {
        Ok(VerificationStatus::Verified) => info!(@mint, "verified {RAFFLE_CONTRACT}"),
        Ok(VerificationStatus::AlreadyVerified) => {
            info!(@grey, "{RAFFLE_CONTRACT} is already verified")
        }
        Ok(VerificationStatus::Skipped(SkipReason::SimulatedNetwork)) => {}
        Ok(VerificationStatus::Skipped(SkipReason::MissingCredential)) => {
            info!(@grey, "no verification credential set, skipping verification")
        }
        Err(err) => warn!(@yellow, "verification failed: {err}"),
    }

    print_next_steps(ctx, &record, record_path.as_deref());
    Ok(DeploymentOutcome {
        subscription,
        record,
        consumer_tx,
        verification,
        record_path,
    })
}

/// Writes the deployment record. A failed write is logged and leaves the run going.
fn save_record(
    store: &DeploymentStore,
    chain_id: u64,
    record: &DeploymentRecord,
    args: &ConstructorArgs,
) -> Option<PathBuf> {
    let saved = SavedDeployment {
        address: record.contract_address,
        transaction_hash: record.transaction_hash,
        confirmations: record.confirmation_count,
        chain_id,
        args: args.rendered(),
    };
    match store.save(RAFFLE_CONTRACT, &saved) {
        Ok(path) => Some(path),
        Err(err) => {
            warn!(@yellow, "could not write deployment record: {err}");
            None
        }
    }
}

fn print_next_steps<C, D, V>(
    ctx: &RunContext<C, D, V>,
    record: &DeploymentRecord,
    record_path: Option<&Path>,
) {
    mintln!(
        "{RAFFLE_CONTRACT} is live on {} at {}",
        ctx.network.name,
        record.contract_address.debug_lavender()
    );
    if let Some(path) = record_path {
        greyln!("deployment record written to {}", path.display());
    }
    greyln!(
        "enter with `enterRaffle()` and at least {} attached",
        format_eth(ctx.network.profile.entrance_fee)
    );
    if ctx.network.class.is_simulated() {
        greyln!("the mock coordinator only fulfils requests when `fulfillRandomWords` is called on it");
    }
}
