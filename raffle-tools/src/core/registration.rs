// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Consumer registration.
//!
//! The mock coordinator only serves randomness to contracts on a subscription's allow-list. Live
//! subscriptions are managed out of band, so registration only happens on simulated networks.

use alloy::{primitives::TxHash, providers::PendingTransactionError};

use crate::{
    core::{
        context::RunContext, coordinator::SubscriptionCoordinator, deployment::DeploymentRecord,
        subscription::Subscription,
    },
    utils::color::DebugColor,
};

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("{0}")]
    Contract(#[from] alloy::contract::Error),
    #[error("{0}")]
    PendingTransaction(#[from] PendingTransactionError),

    #[error("addConsumer tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
}

/// Adds the deployed raffle to the subscription's consumers.
///
/// Returns the `addConsumer` transaction, or `None` on live networks where nothing is sent.
pub async fn register_consumer<C: SubscriptionCoordinator, D, V>(
    ctx: &RunContext<C, D, V>,
    subscription: &mut Subscription,
    record: &DeploymentRecord,
) -> Result<Option<TxHash>, RegistrationError> {
    if !ctx.network.class.is_simulated() {
        debug!(@grey, "skipping consumer registration on live network {}", ctx.network.name);
        return Ok(None);
    }

    let consumer = record.contract_address;
    let tx_hash = ctx
        .coordinator
        .add_consumer(subscription.id, consumer)
        .await?;
    subscription.consumers.insert(consumer);
    info!(
        @grey,
        "added consumer {} to subscription {}",
        consumer.debug_lavender(),
        subscription.id
    );
    Ok(Some(tx_hash))
}
