// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

use raffle_tools::core::{manifest::ManifestError, network::NetworkError};

pub type RaffleDeployResult = Result<(), RaffleDeployError>;

#[derive(Debug)]
pub struct RaffleDeployError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl RaffleDeployError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for RaffleDeployError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for RaffleDeployError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for RaffleDeployError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<raffle_tools::Error> for RaffleDeployError {
    fn from(err: raffle_tools::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<ManifestError> for RaffleDeployError {
    fn from(err: ManifestError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<NetworkError> for RaffleDeployError {
    fn from(err: NetworkError) -> Self {
        Self {
            error: err.into(),
            // Unresolvable networks exit before anything is sent.
            exit_code: ExitCode::from(2),
        }
    }
}
