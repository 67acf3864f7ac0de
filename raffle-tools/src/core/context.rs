// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;
use typed_builder::TypedBuilder;

use crate::core::{
    deployment::record::DeploymentStore,
    network::{ConfirmationPolicy, ResolvedNetwork},
};

/// Everything a provisioning run needs, threaded explicitly through each step.
///
/// A context can only be built from an already resolved network, so no on-chain call can happen
/// for a network without a profile.
#[derive(TypedBuilder)]
pub struct RunContext<C, D, V> {
    pub network: ResolvedNetwork,
    pub confirmations: ConfirmationPolicy,
    /// Account that signs the deployment.
    pub deployer: Address,
    pub coordinator: C,
    pub contracts: D,
    /// Only present when a verification credential is available.
    #[builder(default)]
    pub verifier: Option<V>,
    /// Where deployment records are written, if anywhere.
    #[builder(default)]
    pub records: Option<DeploymentStore>,
}
