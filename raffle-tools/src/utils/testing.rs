// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! In-memory collaborators and fixtures for unit tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    sync::Mutex,
};

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{address, Address, Bloom, LogData, TxHash, B256, U256},
    providers::{Provider, ProviderBuilder},
    transports::mock::Asserter,
};
use serde_json::json;
use tempfile::TempDir;

use crate::core::{
    context::RunContext,
    coordinator::{CreatedSubscription, SubscriptionCoordinator},
    deployment::{ContractDeployer, DeployOptions, DeployedContract, DeploymentError},
    manifest::RaffleConfig,
    network::{ConfirmationPolicy, NetworkId, ResolvedNetwork},
    registration::RegistrationError,
    subscription::SubscriptionError,
    verification::{SourceVerifier, VerificationError, VerificationStatus},
};

pub const DEPLOYER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const COORDINATOR: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const FIRST_SUBSCRIPTION_ID: U256 = U256::from_limbs([1, 0, 0, 0]);
pub const LIVE_CONFIRMATIONS: u64 = 6;

pub fn network(name: &str) -> ResolvedNetwork {
    RaffleConfig::builtin()
        .unwrap()
        .resolve(&NetworkId::Name(name.into()))
        .unwrap()
}

pub fn localhost() -> ResolvedNetwork {
    network("localhost")
}

pub fn sepolia() -> ResolvedNetwork {
    network("sepolia")
}

pub fn context(
    network: ResolvedNetwork,
) -> RunContext<MockCoordinator, MockDeployer, RecordingVerifier> {
    RunContext::builder()
        .confirmations(ConfirmationPolicy::new(network.class, LIVE_CONFIRMATIONS))
        .network(network)
        .deployer(DEPLOYER)
        .coordinator(MockCoordinator::default())
        .contracts(MockDeployer::default())
        .build()
}

pub fn context_with_verifier<V>(
    network: ResolvedNetwork,
    verifier: V,
) -> RunContext<MockCoordinator, MockDeployer, V> {
    RunContext::builder()
        .confirmations(ConfirmationPolicy::new(network.class, LIVE_CONFIRMATIONS))
        .network(network)
        .deployer(DEPLOYER)
        .coordinator(MockCoordinator::default())
        .contracts(MockDeployer::default())
        .verifier(Some(verifier))
        .build()
}

pub fn tx_hash(n: u64) -> TxHash {
    TxHash::left_padding_from(&n.to_be_bytes())
}

/// Provider without fillers that answers each request with the next response on `asserter`.
pub fn mocked_provider(asserter: &Asserter) -> impl Provider {
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter.clone())
}

const BLOCK_HASH: B256 = B256::repeat_byte(0xbb);

/// `eth_getTransactionReceipt` result for a transaction mined in block 1.
pub fn receipt(tx_hash: TxHash, success: bool) -> serde_json::Value {
    let status = if success { "0x1" } else { "0x0" };
    json!({
        "type": "0x2",
        "status": status,
        "cumulativeGasUsed": "0x5208",
        "logs": [],
        "logsBloom": Bloom::ZERO,
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x1",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "from": DEPLOYER,
        "to": null,
        "contractAddress": null
    })
}

/// Receipt log emitted by `address` in `tx_hash`.
pub fn receipt_log(address: Address, tx_hash: TxHash, data: &LogData) -> serde_json::Value {
    json!({
        "address": address,
        "topics": data.topics(),
        "data": data.data,
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x1",
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "logIndex": "0x0",
        "removed": false
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoordinatorCall {
    Create,
    Fund(U256, U256),
    AddConsumer(U256, Address),
}

#[derive(Default)]
struct CoordinatorState {
    calls: Vec<CoordinatorCall>,
    balances: BTreeMap<U256, U256>,
    consumers: BTreeMap<U256, BTreeSet<Address>>,
}

/// Coordinator at [`COORDINATOR`] that hands out sequential subscription ids.
#[derive(Default)]
pub struct MockCoordinator {
    pub fail_creation: bool,
    pub fail_add_consumer: bool,
    state: Mutex<CoordinatorState>,
}

impl MockCoordinator {
    pub fn calls(&self) -> Vec<CoordinatorCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn balance(&self, id: U256) -> Option<U256> {
        self.state.lock().unwrap().balances.get(&id).copied()
    }

    pub fn consumers(&self, id: U256) -> Option<BTreeSet<Address>> {
        self.state.lock().unwrap().consumers.get(&id).cloned()
    }

    fn record(&self, call: CoordinatorCall) -> TxHash {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        tx_hash(state.calls.len() as u64)
    }
}

impl SubscriptionCoordinator for MockCoordinator {
    fn address(&self) -> Address {
        COORDINATOR
    }

    async fn create_subscription(&self) -> Result<CreatedSubscription, SubscriptionError> {
        let tx_hash = self.record(CoordinatorCall::Create);
        if self.fail_creation {
            return Err(SubscriptionError::CreationReverted { tx_hash });
        }
        let mut state = self.state.lock().unwrap();
        let id = FIRST_SUBSCRIPTION_ID + U256::from(state.balances.len());
        state.balances.insert(id, U256::ZERO);
        state.consumers.insert(id, BTreeSet::new());
        Ok(CreatedSubscription { id, tx_hash })
    }

    async fn fund_subscription(&self, id: U256, amount: U256) -> Result<TxHash, SubscriptionError> {
        let tx_hash = self.record(CoordinatorCall::Fund(id, amount));
        let mut state = self.state.lock().unwrap();
        match state.balances.get_mut(&id) {
            Some(balance) => *balance += amount,
            None => return Err(SubscriptionError::FundingReverted { tx_hash }),
        }
        Ok(tx_hash)
    }

    async fn add_consumer(&self, id: U256, consumer: Address) -> Result<TxHash, RegistrationError> {
        let tx_hash = self.record(CoordinatorCall::AddConsumer(id, consumer));
        if self.fail_add_consumer {
            return Err(RegistrationError::Reverted { tx_hash });
        }
        let mut state = self.state.lock().unwrap();
        match state.consumers.get_mut(&id) {
            Some(consumers) => consumers.insert(consumer),
            None => return Err(RegistrationError::Reverted { tx_hash }),
        };
        Ok(tx_hash)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MockDeployment {
    pub name: String,
    pub from: Address,
    pub args: Vec<DynSolValue>,
    pub confirmations: u64,
    pub address: Address,
}

#[derive(Default)]
struct DeployerState {
    nonce: u64,
    deployments: Vec<MockDeployment>,
    live: BTreeSet<Address>,
}

/// Deployer that derives contract addresses from the sender and a local nonce.
#[derive(Default)]
pub struct MockDeployer {
    pub fail: bool,
    state: Mutex<DeployerState>,
}

impl MockDeployer {
    pub fn deployments(&self) -> Vec<MockDeployment> {
        self.state.lock().unwrap().deployments.clone()
    }

    /// Advances the nonce, as if `count` transactions had been sent elsewhere.
    pub fn skip_addresses(&self, count: u64) {
        self.state.lock().unwrap().nonce += count;
    }
}

impl ContractDeployer for MockDeployer {
    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions<'_>,
    ) -> Result<DeployedContract, DeploymentError> {
        let mut state = self.state.lock().unwrap();
        let nonce = state.nonce;
        state.nonce += 1;
        let tx_hash = tx_hash(0x1000 + nonce);
        if self.fail {
            return Err(DeploymentError::Reverted { tx_hash });
        }

        let address = options.from.create(nonce);
        state.live.insert(address);
        state.deployments.push(MockDeployment {
            name: name.to_owned(),
            from: options.from,
            args: options.args.to_vec(),
            confirmations: options.confirmations,
            address,
        });
        Ok(DeployedContract { address, tx_hash })
    }

    async fn is_deployed(&self, address: Address) -> Result<bool, DeploymentError> {
        Ok(self.state.lock().unwrap().live.contains(&address))
    }
}

#[derive(Default)]
pub struct RecordingVerifier {
    calls: Mutex<Vec<(String, Address)>>,
}

impl RecordingVerifier {
    pub fn calls(&self) -> Vec<(String, Address)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SourceVerifier for RecordingVerifier {
    async fn verify(
        &self,
        name: &str,
        address: Address,
        _args: &[DynSolValue],
    ) -> Result<VerificationStatus, VerificationError> {
        self.calls.lock().unwrap().push((name.to_owned(), address));
        Ok(VerificationStatus::Verified)
    }
}

/// Verifier whose service always rejects the submission.
pub struct FailingVerifier;

impl SourceVerifier for FailingVerifier {
    async fn verify(
        &self,
        _name: &str,
        _address: Address,
        _args: &[DynSolValue],
    ) -> Result<VerificationStatus, VerificationError> {
        Err(VerificationError::Rejected("Invalid API Key".into()))
    }
}

const RAFFLE_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "Raffle",
  "sourceName": "contracts/Raffle.sol",
  "abi": [
    {
      "type": "constructor",
      "stateMutability": "nonpayable",
      "inputs": [
        { "name": "entranceFee", "type": "uint256", "internalType": "uint256" },
        { "name": "subscriptionId", "type": "uint256", "internalType": "uint256" },
        { "name": "gasLane", "type": "bytes32", "internalType": "bytes32" },
        { "name": "vrfCoordinatorV2", "type": "address", "internalType": "address" },
        { "name": "callbackGasLimit", "type": "uint32", "internalType": "uint32" },
        { "name": "interval", "type": "uint256", "internalType": "uint256" }
      ]
    },
    {
      "type": "function",
      "name": "enterRaffle",
      "stateMutability": "payable",
      "inputs": [],
      "outputs": []
    }
  ],
  "bytecode": "0x6080604052348015600f57600080fd5b50",
  "deployedBytecode": "0x6080604052",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

const RAFFLE_DBG: &str = r#"{
  "_format": "hh-sol-dbg-1",
  "buildInfo": "../../build-info/5f2a0c1e.json"
}"#;

const BUILD_INFO: &str = r#"{
  "_format": "hh-sol-build-info-1",
  "solcVersion": "0.8.19",
  "solcLongVersion": "0.8.19+commit.7dd6d404",
  "input": {
    "language": "Solidity",
    "sources": { "contracts/Raffle.sol": { "content": "contract Raffle {}" } },
    "settings": { "optimizer": { "enabled": true, "runs": 200 } }
  }
}"#;

const MOCK_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "VRFCoordinatorV2_5Mock",
  "sourceName": "contracts/test/VRFCoordinatorV2_5Mock.sol",
  "abi": [
    {
      "type": "constructor",
      "stateMutability": "nonpayable",
      "inputs": [
        { "name": "_baseFee", "type": "uint96", "internalType": "uint96" },
        { "name": "_gasPrice", "type": "uint96", "internalType": "uint96" },
        { "name": "_weiPerUnitLink", "type": "int256", "internalType": "int256" }
      ]
    }
  ],
  "bytecode": "0x60806040",
  "deployedBytecode": "0x6080",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

fn write(path: impl AsRef<Path>, contents: &str) {
    let path = path.as_ref();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Hardhat-style artifact tree with the raffle and the mock coordinator.
pub fn artifacts_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root.join("contracts/Raffle.sol/Raffle.json"), RAFFLE_ARTIFACT);
    write(root.join("contracts/Raffle.sol/Raffle.dbg.json"), RAFFLE_DBG);
    write(root.join("build-info/5f2a0c1e.json"), BUILD_INFO);
    write(
        root.join("contracts/test/VRFCoordinatorV2_5Mock.sol/VRFCoordinatorV2_5Mock.json"),
        MOCK_ARTIFACT,
    );
    dir
}
