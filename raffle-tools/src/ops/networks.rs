// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::{
    core::{
        manifest::RaffleConfig,
        network::{NetworkError, NetworkId, ResolvedNetwork},
    },
    utils::{
        color::DebugColor,
        format_eth,
    },
};

/// Resolves every configured network by name.
pub fn list_networks(config: &RaffleConfig) -> Vec<(String, Result<ResolvedNetwork, NetworkError>)> {
    config
        .networks
        .keys()
        .map(|name| (name.clone(), config.resolve(&NetworkId::Name(name.clone()))))
        .collect()
}

/// Prints the network table, flagging profiles that would fail to resolve.
pub fn print_networks(config: &RaffleConfig) {
    for (name, resolved) in list_networks(config) {
        let network = match resolved {
            Ok(network) => network,
            Err(err) => {
                greyln!("{}: {}", name.red(), err);
                continue;
            }
        };
        let profile = &network.profile;
        greyln!(
            "{} (chain id {}, {})",
            name.mint(),
            network.chain_id(),
            network.class
        );
        greyln!("  entrance fee: {}", format_eth(profile.entrance_fee));
        greyln!("  key hash: {}", profile.key_hash.debug_lavender());
        greyln!("  callback gas limit: {}", profile.callback_gas_limit);
        greyln!("  update interval: {}s", profile.update_interval);
        match (profile.vrf_coordinator, profile.subscription_id) {
            (Some(coordinator), Some(id)) => {
                greyln!("  coordinator: {}", coordinator.debug_lavender());
                greyln!("  subscription: {id}");
            }
            _ => greyln!("  coordinator: mock, subscription created per run"),
        }
    }
}
