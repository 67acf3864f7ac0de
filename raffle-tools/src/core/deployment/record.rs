// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment records written to `<deployments>/<network>/<Name>.json`.
//!
//! Records are the hand-off to scripts that interact with a deployed raffle, and let later runs
//! find contracts (such as the mock coordinator) deployed earlier.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed deployment record {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no deployment of {name} recorded at {}", .path.display())]
    Missing { name: String, path: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDeployment {
    pub address: Address,
    pub transaction_hash: TxHash,
    pub confirmations: u64,
    pub chain_id: u64,
    /// Constructor arguments, rendered as strings.
    pub args: Vec<String>,
}

/// Deployment records of one network.
#[derive(Clone, Debug)]
pub struct DeploymentStore {
    dir: PathBuf,
}

impl DeploymentStore {
    pub fn new(root: impl AsRef<Path>, network: &str) -> Self {
        Self {
            dir: root.as_ref().join(network),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn save(&self, name: &str, deployment: &SavedDeployment) -> Result<PathBuf, RecordError> {
        let path = self.path(name);
        fs::create_dir_all(&self.dir).map_err(|source| RecordError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let json = serde_json::to_string_pretty(deployment).map_err(|source| RecordError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| RecordError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Reads the record for `name`, if one was saved.
    pub fn load(&self, name: &str) -> Result<Option<SavedDeployment>, RecordError> {
        let path = self.path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(RecordError::Io { path, source }),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| RecordError::Json { path, source })
    }

    /// Like [`DeploymentStore::load`], but a missing record is an error.
    pub fn require(&self, name: &str) -> Result<SavedDeployment, RecordError> {
        self.load(name)?.ok_or_else(|| RecordError::Missing {
            name: name.to_owned(),
            path: self.path(name),
        })
    }
}
