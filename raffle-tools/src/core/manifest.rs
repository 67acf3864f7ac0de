// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! `Raffle.toml` project manifest and the built-in network table.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{de::DeserializeOwned, Deserialize};

use crate::core::network::{
    self, ConfirmationPolicy, NetworkClass, NetworkEntry, NetworkError, NetworkId, ResolvedNetwork,
};

/// Filename for project manifests.
pub const FILENAME: &str = "Raffle.toml";

/// Network table shipped with the tools.
const BUILTIN: &str = include_str!("../../networks.toml");

pub const DEFAULT_VERIFICATION_BLOCK_CONFIRMATIONS: u64 = 6;
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("missing manifest: {}", .0.display())]
    Missing(PathBuf),
}

pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ManifestError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ManifestError::Missing(path.to_owned()));
    }

    let contents = fs::read_to_string(path)?;
    let manifest = toml::from_str(&contents)?;
    Ok(manifest)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    pub verification_block_confirmations: Option<u64>,
    /// Seconds to wait for a deployment to reach its confirmation depth.
    pub confirmation_timeout: Option<u64>,
    pub artifacts_dir: Option<PathBuf>,
    pub deployments_dir: Option<PathBuf>,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkEntry>,
}

/// Effective configuration: the built-in table with the project manifest layered on top.
#[derive(Debug)]
pub struct RaffleConfig {
    pub verification_block_confirmations: u64,
    pub confirmation_timeout: Duration,
    pub artifacts_dir: PathBuf,
    pub deployments_dir: PathBuf,
    pub networks: BTreeMap<String, NetworkEntry>,
}

impl RaffleConfig {
    pub fn builtin() -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(BUILTIN)?;
        let mut config = Self {
            verification_block_confirmations: DEFAULT_VERIFICATION_BLOCK_CONFIRMATIONS,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            artifacts_dir: "artifacts".into(),
            deployments_dir: "deployments".into(),
            networks: BTreeMap::new(),
        };
        config.merge(manifest);
        Ok(config)
    }

    /// Loads the configuration for a run.
    ///
    /// An explicit `path` must exist. Without one, `Raffle.toml` in the current directory is used
    /// if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ManifestError> {
        let mut config = Self::builtin()?;
        let manifest: Option<Manifest> = match path {
            Some(path) => Some(load(path)?),
            None if Path::new(FILENAME).exists() => Some(load(FILENAME)?),
            None => None,
        };
        if let Some(manifest) = manifest {
            debug!(@grey, "loaded {} network(s) from manifest", manifest.networks.len());
            config.merge(manifest);
        }
        Ok(config)
    }

    /// Layers `manifest` over this configuration. Networks are replaced by name.
    pub fn merge(&mut self, manifest: Manifest) {
        if let Some(confirmations) = manifest.verification_block_confirmations {
            self.verification_block_confirmations = confirmations;
        }
        if let Some(timeout) = manifest.confirmation_timeout {
            self.confirmation_timeout = Duration::from_secs(timeout);
        }
        if let Some(dir) = manifest.artifacts_dir {
            self.artifacts_dir = dir;
        }
        if let Some(dir) = manifest.deployments_dir {
            self.deployments_dir = dir;
        }
        self.networks.extend(manifest.networks);
    }

    pub fn resolve(&self, id: &NetworkId) -> Result<ResolvedNetwork, NetworkError> {
        network::resolve(&self.networks, id)
    }

    pub fn confirmation_policy(&self, class: NetworkClass) -> ConfirmationPolicy {
        ConfirmationPolicy::new(class, self.verification_block_confirmations)
    }
}
