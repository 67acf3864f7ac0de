// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, TxHash, B256, U256},
    providers::PendingTransactionError,
};

use crate::{
    core::{
        artifact::ArtifactError, context::RunContext, network::NetworkProfile,
        subscription::Subscription,
    },
    utils::color::DebugColor,
};

pub mod record;
pub mod request;

/// Artifact name of the raffle contract.
pub const RAFFLE_CONTRACT: &str = "Raffle";

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    #[error("deploy tx {} was not confirmed: {source}", .tx_hash.debug_red())]
    Unconfirmed {
        tx_hash: TxHash,
        #[source]
        source: PendingTransactionError,
    },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt of {}", .tx_hash.debug_red())]
    NoContractAddress { tx_hash: TxHash },
}

/// Raffle constructor arguments, in constructor order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorArgs {
    pub entrance_fee: U256,
    pub subscription_id: U256,
    pub key_hash: B256,
    pub vrf_coordinator: Address,
    pub callback_gas_limit: u32,
    pub interval: u64,
}

impl ConstructorArgs {
    pub fn new(profile: &NetworkProfile, subscription: &Subscription) -> Self {
        Self {
            entrance_fee: profile.entrance_fee,
            subscription_id: subscription.id,
            key_hash: profile.key_hash,
            vrf_coordinator: subscription.coordinator,
            callback_gas_limit: profile.callback_gas_limit,
            interval: profile.update_interval,
        }
    }

    pub fn values(&self) -> Vec<DynSolValue> {
        vec![
            DynSolValue::Uint(self.entrance_fee, 256),
            DynSolValue::Uint(self.subscription_id, 256),
            DynSolValue::FixedBytes(self.key_hash, 32),
            DynSolValue::Address(self.vrf_coordinator),
            DynSolValue::Uint(U256::from(self.callback_gas_limit), 32),
            DynSolValue::Uint(U256::from(self.interval), 256),
        ]
    }

    /// Arguments rendered so they can be parsed back against the constructor ABI.
    pub fn rendered(&self) -> Vec<String> {
        vec![
            self.entrance_fee.to_string(),
            self.subscription_id.to_string(),
            self.key_hash.to_string(),
            self.vrf_coordinator.to_string(),
            self.callback_gas_limit.to_string(),
            self.interval.to_string(),
        ]
    }
}

#[derive(Debug)]
pub struct DeployOptions<'a> {
    pub from: Address,
    pub args: &'a [DynSolValue],
    /// Blocks to wait for after inclusion.
    pub confirmations: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Submits contract-creation transactions.
#[allow(async_fn_in_trait)]
pub trait ContractDeployer {
    /// Deploys contract `name` and waits for `options.confirmations` blocks.
    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions<'_>,
    ) -> Result<DeployedContract, DeploymentError>;

    /// Whether there is code at `address`.
    async fn is_deployed(&self, address: Address) -> Result<bool, DeploymentError>;
}

/// A confirmed raffle deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeploymentRecord {
    pub contract_address: Address,
    pub transaction_hash: TxHash,
    pub confirmation_count: u64,
}

/// Deploys the raffle with `args` and waits for the run's confirmation depth.
pub async fn execute<C, D: ContractDeployer, V>(
    ctx: &RunContext<C, D, V>,
    args: &ConstructorArgs,
) -> Result<DeploymentRecord, DeploymentError> {
    let confirmations = ctx.confirmations.confirmations;
    debug!(@grey, "deployer address: {}", ctx.deployer.debug_lavender());
    info!(
        @grey,
        "deploying {RAFFLE_CONTRACT}, waiting for {confirmations} confirmation(s)"
    );
    let deployed = ctx
        .contracts
        .deploy(
            RAFFLE_CONTRACT,
            DeployOptions {
                from: ctx.deployer,
                args: &args.values(),
                confirmations,
            },
        )
        .await?;
    info!(@grey, "deployed {RAFFLE_CONTRACT} at address: {}", deployed.address.debug_lavender());
    info!(@grey, "deployment tx hash: {}", deployed.tx_hash.debug_lavender());

    Ok(DeploymentRecord {
        contract_address: deployed.address,
        transaction_hash: deployed.tx_hash,
        confirmation_count: confirmations,
    })
}
