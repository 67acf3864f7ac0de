// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use alloy::{
    network::EthereumWallet,
    primitives::FixedBytes,
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::{
        local::{LocalSigner, PrivateKeySigner},
        Signer,
    },
};
use eyre::{eyre, Context};
use raffle_tools::core::{
    manifest::{ManifestError, RaffleConfig},
    network::{NetworkError, NetworkId, ResolvedNetwork},
};

use crate::{constants::DEFAULT_ENDPOINT, utils::decode0x};

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
}

impl AuthArgs {
    fn build_wallet(&self, chain_id: u64) -> eyre::Result<EthereumWallet> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                return Err(eyre!("empty private key"));
            }
            return private_key_wallet(key, chain_id);
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return private_key_wallet(&key, chain_id);
        }

        let keystore = self
            .keystore_path
            .as_ref()
            .ok_or(eyre!("no wallet: pass --private-key, --private-key-path or --keystore-path"))?;
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))?;

        let signer =
            LocalSigner::decrypt_keystore(keystore, password)?.with_chain_id(Some(chain_id));
        Ok(EthereumWallet::new(signer))
    }
}

fn private_key_wallet(key: &str, chain_id: u64) -> eyre::Result<EthereumWallet> {
    let bytes = decode0x(key)?;
    if bytes.len() != 32 {
        return Err(eyre!("private key must be 32 bytes, got {}", bytes.len()));
    }
    let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(&bytes);
    let signer = PrivateKeySigner::from_bytes(&priv_key_bytes)?.with_chain_id(Some(chain_id));
    Ok(EthereumWallet::new(signer))
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// JSON-RPC endpoint of the target network
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl ProviderArgs {
    pub async fn build_provider(&self) -> eyre::Result<impl Provider> {
        let provider = ProviderBuilder::new().connect(&self.endpoint).await?;
        Ok(provider)
    }

    pub async fn build_provider_with_wallet(
        &self,
        auth: &AuthArgs,
    ) -> eyre::Result<impl Provider + WalletProvider> {
        let provider = self.build_provider().await?;
        let chain_id = provider.get_chain_id().await?;
        let wallet = auth.build_wallet(chain_id)?;
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&self.endpoint)
            .await?;
        Ok(provider)
    }
}

#[derive(Debug, clap::Args)]
pub struct NetworkArgs {
    /// Network name or chain id. Defaults to the chain id reported by the endpoint
    #[arg(short, long)]
    network: Option<NetworkId>,
    /// Path to a Raffle.toml manifest. Defaults to ./Raffle.toml when present
    #[arg(long)]
    config: Option<PathBuf>,
}

impl NetworkArgs {
    pub fn load_config(&self) -> Result<RaffleConfig, ManifestError> {
        RaffleConfig::load(self.config.as_deref())
    }

    pub fn network(&self) -> Option<&NetworkId> {
        self.network.as_ref()
    }

    /// Resolves the requested network and checks it against the endpoint's chain id.
    pub fn resolve(
        &self,
        config: &RaffleConfig,
        chain_id: u64,
    ) -> Result<ResolvedNetwork, NetworkError> {
        let id = self.network.clone().unwrap_or(NetworkId::ChainId(chain_id));
        let network = config.resolve(&id)?;
        network.check_chain_id(chain_id)?;
        Ok(network)
    }
}
