// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::{utils::format_ether, U256};
use color::Color;

pub mod color;

#[cfg(test)]
pub(crate) mod testing;

/// Pretty-prints a wei amount as ether.
pub fn format_eth(wei: U256) -> String {
    format!("{} ETH", format_ether(wei)).mint()
}
