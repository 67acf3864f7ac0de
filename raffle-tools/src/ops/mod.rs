// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use deploy::{deploy, DeploymentOutcome};
pub use networks::{list_networks, print_networks};
pub use verify::verify;

mod deploy;
mod networks;
mod verify;
