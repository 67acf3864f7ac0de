// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract-creation transactions sent over JSON-RPC.

use std::time::Duration;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use typed_builder::TypedBuilder;

use super::{ContractDeployer, DeployOptions, DeployedContract, DeploymentError};
use crate::{
    core::{artifact::Artifacts, manifest::DEFAULT_CONFIRMATION_TIMEOUT},
    utils::color::DebugColor,
};

/// Deployment transaction request
#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
}

impl DeploymentRequest {
    pub fn new(sender: Address, initcode: Bytes) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(initcode),
        }
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        Ok(provider.estimate_gas(self.tx.clone()).await?)
    }

    /// Sends the transaction and waits until it is `confirmations` blocks deep.
    pub async fn exec(
        self,
        provider: &impl Provider,
        confirmations: u64,
        timeout: Duration,
    ) -> Result<TransactionReceipt, DeploymentError> {
        let gas = self.estimate_gas(provider).await?;
        debug!(@grey, "estimated deployment gas: {gas}");

        let mut tx = self.tx;
        tx.gas = Some(gas);

        let tx = provider.send_transaction(tx).await?;
        let tx_hash = *tx.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        let receipt = tx
            .with_required_confirmations(confirmations)
            .with_timeout(Some(timeout))
            .get_receipt()
            .await
            .map_err(|source| DeploymentError::Unconfirmed { tx_hash, source })?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }

        Ok(receipt)
    }
}

/// Deploys compiled artifacts through a provider whose wallet can sign for the sender.
#[derive(TypedBuilder)]
pub struct ArtifactDeployer<P> {
    provider: P,
    artifacts: Artifacts,
    #[builder(default = DEFAULT_CONFIRMATION_TIMEOUT)]
    timeout: Duration,
}

impl<P: Provider> ContractDeployer for ArtifactDeployer<P> {
    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions<'_>,
    ) -> Result<DeployedContract, DeploymentError> {
        let artifact = self.artifacts.find(name)?;
        let initcode = artifact.initcode(options.args)?;
        let receipt = DeploymentRequest::new(options.from, initcode)
            .exec(&self.provider, options.confirmations, self.timeout)
            .await?;
        let tx_hash = receipt.transaction_hash;
        let address = receipt
            .contract_address
            .ok_or(DeploymentError::NoContractAddress { tx_hash })?;
        debug!(@grey, "gas used: {}", receipt.gas_used);
        Ok(DeployedContract { address, tx_hash })
    }

    async fn is_deployed(&self, address: Address) -> Result<bool, DeploymentError> {
        Ok(!self.provider.get_code_at(address).await?.is_empty())
    }
}
