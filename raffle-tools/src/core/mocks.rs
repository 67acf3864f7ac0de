// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Mock VRF coordinator for simulated networks.

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, I256, U256},
};

use crate::{
    core::{
        deployment::{
            record::{DeploymentStore, SavedDeployment},
            ContractDeployer, DeployOptions,
        },
        network::ResolvedNetwork,
    },
    utils::color::DebugColor,
    Result,
};

/// Artifact name of the mock coordinator.
pub const COORDINATOR_MOCK: &str = "VRFCoordinatorV2_5Mock";

/// Flat fee per request: 0.25 LINK.
pub const MOCK_BASE_FEE: U256 = U256::from_limbs([250_000_000_000_000_000, 0, 0, 0]);
/// Gas price used to bill fulfilments, in LINK wei.
pub const MOCK_GAS_PRICE: U256 = U256::from_limbs([1_000_000_000, 0, 0, 0]);
/// LINK/native exchange rate.
pub const MOCK_WEI_PER_UNIT_LINK: I256 =
    I256::from_raw(U256::from_limbs([4_000_000_000_000_000, 0, 0, 0]));

pub fn constructor_args() -> Vec<DynSolValue> {
    vec![
        DynSolValue::Uint(MOCK_BASE_FEE, 96),
        DynSolValue::Uint(MOCK_GAS_PRICE, 96),
        DynSolValue::Int(MOCK_WEI_PER_UNIT_LINK, 256),
    ]
}

/// Finds the coordinator to provision against on a simulated network.
///
/// Uses the profile's coordinator if one is configured, then a previously recorded mock that still
/// has code, and otherwise deploys a fresh mock and records it.
pub async fn ensure_coordinator(
    network: &ResolvedNetwork,
    deployer: &impl ContractDeployer,
    from: Address,
    store: &DeploymentStore,
) -> Result<Address> {
    if let Some(address) = network.profile.vrf_coordinator {
        return Ok(address);
    }

    if let Some(saved) = store.load(COORDINATOR_MOCK)? {
        if saved.chain_id == network.chain_id() && deployer.is_deployed(saved.address).await? {
            debug!(@grey, "reusing {COORDINATOR_MOCK} at {}", saved.address.debug_lavender());
            return Ok(saved.address);
        }
    }

    info!(@grey, "deploying {COORDINATOR_MOCK}");
    let args = constructor_args();
    let deployed = deployer
        .deploy(
            COORDINATOR_MOCK,
            DeployOptions {
                from,
                args: &args,
                confirmations: 1,
            },
        )
        .await?;
    store.save(
        COORDINATOR_MOCK,
        &SavedDeployment {
            address: deployed.address,
            transaction_hash: deployed.tx_hash,
            confirmations: 1,
            chain_id: network.chain_id(),
            args: vec![
                MOCK_BASE_FEE.to_string(),
                MOCK_GAS_PRICE.to_string(),
                MOCK_WEI_PER_UNIT_LINK.to_string(),
            ],
        },
    )?;
    info!(@grey, "deployed {COORDINATOR_MOCK} at {}", deployed.address.debug_lavender());
    Ok(deployed.address)
}
