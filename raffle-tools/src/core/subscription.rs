// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! VRF subscription provisioning.
//!
//! Simulated networks get a fresh subscription, created and funded on the mock coordinator for
//! every run. Live networks reuse the subscription named in their profile, which must already be
//! funded.

use std::collections::BTreeSet;

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::PendingTransactionError,
};

use crate::{
    core::{context::RunContext, coordinator::SubscriptionCoordinator, network::NetworkClass},
    utils::{color::DebugColor, format_eth},
};

/// Amount each locally created subscription is funded with: 1 ether, in wei.
pub const FUND_AMOUNT: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    #[error("{0}")]
    Contract(#[from] alloy::contract::Error),
    #[error("{0}")]
    PendingTransaction(#[from] PendingTransactionError),

    #[error("createSubscription tx reverted {}", .tx_hash.debug_red())]
    CreationReverted { tx_hash: TxHash },
    #[error("fundSubscription tx reverted {}", .tx_hash.debug_red())]
    FundingReverted { tx_hash: TxHash },
    #[error("no SubscriptionCreated event in the createSubscription receipt")]
    MissingCreatedEvent,
    #[error("failed to decode SubscriptionCreated event: {0}")]
    MalformedCreatedEvent(alloy::sol_types::Error),
    #[error("profile has no `{0}`")]
    MissingProfileField(&'static str),
}

/// Where the subscription used by a run came from. Exactly one source is used per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubscriptionSource {
    Created {
        creation_tx: TxHash,
        funding_tx: TxHash,
    },
    Profile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub id: U256,
    pub coordinator: Address,
    pub source: SubscriptionSource,
    /// Balance added by this run; unknown for reused subscriptions.
    pub funded_balance: Option<U256>,
    /// Consumers registered by this run.
    pub consumers: BTreeSet<Address>,
}

/// Establishes the subscription the raffle will draw randomness from.
pub async fn provision<C: SubscriptionCoordinator, D, V>(
    ctx: &RunContext<C, D, V>,
) -> Result<Subscription, SubscriptionError> {
    match ctx.network.class {
        NetworkClass::Simulated => {
            if let Some(id) = ctx.network.profile.subscription_id {
                warn!(
                    @yellow,
                    "{} is simulated, ignoring configured subscription {id}",
                    ctx.network.name
                );
            }
            create_and_fund(&ctx.coordinator).await
        }
        NetworkClass::Live => {
            let profile = &ctx.network.profile;
            let id = profile
                .subscription_id
                .ok_or(SubscriptionError::MissingProfileField("subscription-id"))?;
            let coordinator = profile
                .vrf_coordinator
                .ok_or(SubscriptionError::MissingProfileField("vrf-coordinator"))?;
            info!(@grey, "using subscription {id} on coordinator {}", coordinator.debug_lavender());
            Ok(Subscription {
                id,
                coordinator,
                source: SubscriptionSource::Profile,
                funded_balance: None,
                consumers: BTreeSet::new(),
            })
        }
    }
}

async fn create_and_fund(
    coordinator: &impl SubscriptionCoordinator,
) -> Result<Subscription, SubscriptionError> {
    let address = coordinator.address();
    info!(@grey, "creating subscription on coordinator {}", address.debug_lavender());
    let created = coordinator.create_subscription().await?;
    info!(@grey, "created subscription {}", created.id);

    let funding_tx = coordinator
        .fund_subscription(created.id, FUND_AMOUNT)
        .await?;
    info!(@grey, "funded subscription {} with {}", created.id, format_eth(FUND_AMOUNT));

    Ok(Subscription {
        id: created.id,
        coordinator: address,
        source: SubscriptionSource::Created {
            creation_tx: created.tx_hash,
            funding_tx,
        },
        funded_balance: Some(FUND_AMOUNT),
        consumers: BTreeSet::new(),
    })
}

#[cfg(test)]
mod tests {
    use alloy::primitives::utils::parse_ether;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::testing::{self, CoordinatorCall};

    #[test]
    fn fund_amount_is_one_ether() {
        assert_eq!(FUND_AMOUNT, parse_ether("1").unwrap());
    }

    #[tokio::test]
    async fn simulated_creates_and_funds() {
        let ctx = testing::context(testing::localhost());
        let subscription = provision(&ctx).await.unwrap();

        assert_eq!(subscription.id, testing::FIRST_SUBSCRIPTION_ID);
        assert_eq!(subscription.coordinator, testing::COORDINATOR);
        assert_eq!(subscription.funded_balance, Some(FUND_AMOUNT));
        assert!(matches!(subscription.source, SubscriptionSource::Created { .. }));
        assert_eq!(
            ctx.coordinator.calls(),
            vec![
                CoordinatorCall::Create,
                CoordinatorCall::Fund(testing::FIRST_SUBSCRIPTION_ID, FUND_AMOUNT),
            ]
        );
        assert_eq!(
            ctx.coordinator.balance(testing::FIRST_SUBSCRIPTION_ID),
            Some(FUND_AMOUNT)
        );
    }

    #[tokio::test]
    async fn simulated_ignores_configured_subscription() {
        let mut network = testing::localhost();
        network.profile.subscription_id = Some(U256::from(7));
        let ctx = testing::context(network);
        let subscription = provision(&ctx).await.unwrap();

        assert_eq!(subscription.id, testing::FIRST_SUBSCRIPTION_ID);
        assert!(matches!(subscription.source, SubscriptionSource::Created { .. }));
        assert_eq!(ctx.coordinator.calls().len(), 2);
    }

    #[tokio::test]
    async fn live_reuses_profile_without_calls() {
        let network = testing::sepolia();
        let ctx = testing::context(network.clone());
        let subscription = provision(&ctx).await.unwrap();

        assert_eq!(Some(subscription.id), network.profile.subscription_id);
        assert_eq!(Some(subscription.coordinator), network.profile.vrf_coordinator);
        assert_eq!(subscription.source, SubscriptionSource::Profile);
        assert_eq!(subscription.funded_balance, None);
        assert!(ctx.coordinator.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_creation_skips_funding() {
        let mut ctx = testing::context(testing::localhost());
        ctx.coordinator.fail_creation = true;
        let err = provision(&ctx).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::CreationReverted { .. }));
        assert_eq!(ctx.coordinator.calls(), vec![CoordinatorCall::Create]);
    }
}
