// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for provisioning and deploying VRF-backed raffle contracts.
//!
//! The [`core`] module holds one component per provisioning step, while [`ops`] strings them
//! together into the user-facing workflows driven by the `raffle-deploy` CLI.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

pub use error::{Error, Result};
