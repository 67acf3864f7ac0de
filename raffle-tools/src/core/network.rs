// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network profiles and their resolution.
//!
//! Every run starts by turning a [`NetworkId`] into a [`ResolvedNetwork`]. The resolved network
//! carries the [`NetworkClass`] that every later step branches on, so the "is this a local chain"
//! decision is made exactly once.

use std::{collections::BTreeMap, fmt, str::FromStr};

use alloy::primitives::{utils::parse_ether, Address, B256, U256};
use serde::{Deserialize, Deserializer};

use crate::utils::color::Color;

/// Network names treated as simulated when an entry does not set `class` explicitly.
pub const DEVELOPMENT_CHAINS: &[&str] = &["hardhat", "localhost"];

/// Chain id used by local development nodes (hardhat, anvil).
pub const DEVELOPMENT_CHAIN_ID: u64 = 31337;

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("unknown network {}: no profile is configured for it", .0.red())]
    Unknown(NetworkId),
    #[error("chain id {chain_id} matches several configured networks: {}", .names.join(", "))]
    Ambiguous { chain_id: u64, names: Vec<String> },
    #[error("live network {} is missing `{field}` in its profile", .network.red())]
    IncompleteProfile {
        network: String,
        field: &'static str,
    },
    #[error("network {network} expects chain id {expected}, but the endpoint reports {actual}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
}

/// Identifier of the network to deploy to, either a configured name or a chain id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkId {
    ChainId(u64),
    Name(String),
}

impl FromStr for NetworkId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse() {
            Ok(chain_id) => Self::ChainId(chain_id),
            Err(_) => Self::Name(s.to_owned()),
        })
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChainId(chain_id) => write!(f, "{chain_id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkClass {
    /// Local node with a mock VRF coordinator.
    Simulated,
    /// Public chain backed by the real oracle network.
    Live,
}

impl NetworkClass {
    /// Default classification for networks without an explicit `class`.
    pub fn infer(name: &str, chain_id: u64) -> Self {
        if DEVELOPMENT_CHAINS.contains(&name) || chain_id == DEVELOPMENT_CHAIN_ID {
            Self::Simulated
        } else {
            Self::Live
        }
    }

    pub fn is_simulated(self) -> bool {
        self == Self::Simulated
    }
}

impl fmt::Display for NetworkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulated => f.write_str("simulated"),
            Self::Live => f.write_str("live"),
        }
    }
}

/// Number of blocks to wait for before a transaction is considered final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub confirmations: u64,
}

impl ConfirmationPolicy {
    pub fn new(class: NetworkClass, live_confirmations: u64) -> Self {
        let confirmations = match class {
            NetworkClass::Simulated => 1,
            NetworkClass::Live => live_confirmations.max(1),
        };
        Self { confirmations }
    }
}

/// One row of the network table, as written in `Raffle.toml`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct NetworkEntry {
    pub chain_id: u64,
    #[serde(default)]
    pub class: Option<NetworkClass>,
    /// Decimal ether amount, e.g. `"0.01"`.
    #[serde(deserialize_with = "ether")]
    pub entrance_fee: U256,
    pub key_hash: B256,
    pub callback_gas_limit: u32,
    /// Seconds between automated draws.
    pub update_interval: u64,
    #[serde(default)]
    pub vrf_coordinator: Option<Address>,
    #[serde(default, deserialize_with = "optional_u256")]
    pub subscription_id: Option<U256>,
}

/// Parameters the raffle is provisioned and deployed with on one network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkProfile {
    pub chain_id: u64,
    pub entrance_fee: U256,
    pub key_hash: B256,
    pub callback_gas_limit: u32,
    pub update_interval: u64,
    /// Required on live networks.
    pub vrf_coordinator: Option<Address>,
    /// Required on live networks.
    pub subscription_id: Option<U256>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedNetwork {
    pub name: String,
    pub class: NetworkClass,
    pub profile: NetworkProfile,
}

impl ResolvedNetwork {
    pub fn chain_id(&self) -> u64 {
        self.profile.chain_id
    }

    /// Ensures the connected endpoint is actually the network we resolved.
    pub fn check_chain_id(&self, actual: u64) -> Result<(), NetworkError> {
        if self.chain_id() == actual {
            Ok(())
        } else {
            Err(NetworkError::ChainIdMismatch {
                network: self.name.clone(),
                expected: self.chain_id(),
                actual,
            })
        }
    }
}

/// Looks up `id` in the network table.
///
/// There is no fallback profile: an identifier without an entry is an error.
pub fn resolve(
    networks: &BTreeMap<String, NetworkEntry>,
    id: &NetworkId,
) -> Result<ResolvedNetwork, NetworkError> {
    let (name, entry) = match id {
        NetworkId::Name(name) => networks
            .get_key_value(name)
            .ok_or_else(|| NetworkError::Unknown(id.clone()))?,
        NetworkId::ChainId(chain_id) => {
            let mut matches = networks
                .iter()
                .filter(|(_, entry)| entry.chain_id == *chain_id);
            let first = matches.next().ok_or_else(|| NetworkError::Unknown(id.clone()))?;
            let rest: Vec<_> = matches.map(|(name, _)| name.clone()).collect();
            if !rest.is_empty() {
                let names = std::iter::once(first.0.clone()).chain(rest).collect();
                return Err(NetworkError::Ambiguous {
                    chain_id: *chain_id,
                    names,
                });
            }
            first
        }
    };

    let class = entry
        .class
        .unwrap_or_else(|| NetworkClass::infer(name, entry.chain_id));
    if class == NetworkClass::Live {
        let missing = if entry.vrf_coordinator.is_none() {
            Some("vrf-coordinator")
        } else if entry.subscription_id.is_none() {
            Some("subscription-id")
        } else {
            None
        };
        if let Some(field) = missing {
            return Err(NetworkError::IncompleteProfile {
                network: name.clone(),
                field,
            });
        }
    }

    Ok(ResolvedNetwork {
        name: name.clone(),
        class,
        profile: NetworkProfile {
            chain_id: entry.chain_id,
            entrance_fee: entry.entrance_fee,
            key_hash: entry.key_hash,
            callback_gas_limit: entry.callback_gas_limit,
            update_interval: entry.update_interval,
            vrf_coordinator: entry.vrf_coordinator,
            subscription_id: entry.subscription_id,
        },
    })
}

fn ether<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let amount = String::deserialize(deserializer)?;
    parse_ether(&amount).map_err(serde::de::Error::custom)
}

// Subscription ids are uint256 and routinely exceed what a TOML integer can hold.
fn optional_u256<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<U256>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(value)) => Ok(Some(U256::from(value))),
        Some(Raw::Str(value)) => U256::from_str(&value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
