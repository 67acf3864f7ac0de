// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod artifact;
pub mod context;
pub mod coordinator;
pub mod deployment;
pub mod manifest;
pub mod mocks;
pub mod network;
pub mod registration;
pub mod subscription;
pub mod verification;
