// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! VRF v2.5 coordinator bindings.

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::Provider,
    rpc::types::Log,
    sol,
    sol_types::SolEvent,
};

use crate::{
    core::{registration::RegistrationError, subscription::SubscriptionError},
    utils::color::DebugColor,
};

sol! {
    #[sol(rpc)]
    interface VRFCoordinatorV2_5 {
        event SubscriptionCreated(uint256 indexed subId, address owner);

        function createSubscription() external returns (uint256 subId);
        function fundSubscription(uint256 subId, uint256 amount) external;
        function addConsumer(uint256 subId, address consumer) external;
    }
}

/// Result of a confirmed `createSubscription` transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatedSubscription {
    pub id: U256,
    pub tx_hash: TxHash,
}

/// Subscription management operations of the oracle coordinator.
///
/// Every method returns only once its transaction has a receipt.
#[allow(async_fn_in_trait)]
pub trait SubscriptionCoordinator {
    fn address(&self) -> Address;

    async fn create_subscription(&self) -> Result<CreatedSubscription, SubscriptionError>;

    async fn fund_subscription(&self, id: U256, amount: U256) -> Result<TxHash, SubscriptionError>;

    async fn add_consumer(&self, id: U256, consumer: Address) -> Result<TxHash, RegistrationError>;
}

/// Coordinator reached over JSON-RPC.
pub struct RpcCoordinator<P> {
    instance: VRFCoordinatorV2_5::VRFCoordinatorV2_5Instance<P>,
}

impl<P: Provider> RpcCoordinator<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            instance: VRFCoordinatorV2_5::new(address, provider),
        }
    }
}

impl<P: Provider> SubscriptionCoordinator for RpcCoordinator<P> {
    fn address(&self) -> Address {
        *self.instance.address()
    }

    async fn create_subscription(&self) -> Result<CreatedSubscription, SubscriptionError> {
        let receipt = self
            .instance
            .createSubscription()
            .send()
            .await?
            .get_receipt()
            .await?;
        let tx_hash = receipt.transaction_hash;
        debug!(@grey, "createSubscription tx: {}", tx_hash.debug_lavender());
        if !receipt.status() {
            return Err(SubscriptionError::CreationReverted { tx_hash });
        }
        let id = subscription_id_from_logs(receipt.inner.logs())?;
        Ok(CreatedSubscription { id, tx_hash })
    }

    async fn fund_subscription(&self, id: U256, amount: U256) -> Result<TxHash, SubscriptionError> {
        let receipt = self
            .instance
            .fundSubscription(id, amount)
            .send()
            .await?
            .get_receipt()
            .await?;
        let tx_hash = receipt.transaction_hash;
        if !receipt.status() {
            return Err(SubscriptionError::FundingReverted { tx_hash });
        }
        Ok(tx_hash)
    }

    async fn add_consumer(&self, id: U256, consumer: Address) -> Result<TxHash, RegistrationError> {
        let receipt = self
            .instance
            .addConsumer(id, consumer)
            .send()
            .await?
            .get_receipt()
            .await?;
        let tx_hash = receipt.transaction_hash;
        if !receipt.status() {
            return Err(RegistrationError::Reverted { tx_hash });
        }
        Ok(tx_hash)
    }
}

/// Extracts the new subscription id from the `SubscriptionCreated` event.
///
/// The event is matched by signature rather than by its position in the receipt.
pub fn subscription_id_from_logs(logs: &[Log]) -> Result<U256, SubscriptionError> {
    let log = logs
        .iter()
        .find(|log| match log.topics().first() {
            Some(topic) => *topic == VRFCoordinatorV2_5::SubscriptionCreated::SIGNATURE_HASH,
            None => false,
        })
        .ok_or(SubscriptionError::MissingCreatedEvent)?;
    let event = VRFCoordinatorV2_5::SubscriptionCreated::decode_log_data(log.data())
        .map_err(SubscriptionError::MalformedCreatedEvent)?;
    Ok(event.subId)
}
