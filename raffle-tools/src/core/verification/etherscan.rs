// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Etherscan (v2 multichain API) verification client.

use std::time::Duration;

use alloy::{dyn_abi::DynSolValue, primitives::Address};
use serde::Deserialize;
use typed_builder::TypedBuilder;

use super::{SourceVerifier, VerificationError, VerificationStatus};
use crate::core::artifact::Artifacts;

pub const ETHERSCAN_API_URL: &str = "https://api.etherscan.io/v2/api";

/// Environment variable holding the Etherscan API key.
pub const API_KEY_ENV: &str = "ETHERSCAN_API_KEY";

#[derive(TypedBuilder)]
pub struct EtherscanVerifier {
    #[builder(setter(into))]
    api_key: String,
    chain_id: u64,
    artifacts: Artifacts,
    #[builder(default = ETHERSCAN_API_URL.to_owned(), setter(into))]
    api_url: String,
    #[builder(default = Duration::from_secs(5))]
    poll_interval: Duration,
    #[builder(default = 12)]
    max_polls: u32,
    #[builder(default)]
    client: reqwest::Client,
}

impl EtherscanVerifier {
    /// Builds a verifier if `ETHERSCAN_API_KEY` is set to a non-empty value.
    pub fn from_env(chain_id: u64, artifacts: Artifacts) -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())?;
        Some(
            Self::builder()
                .api_key(api_key)
                .chain_id(chain_id)
                .artifacts(artifacts)
                .build(),
        )
    }

    async fn check_status(&self, guid: &str) -> Result<PollStatus, VerificationError> {
        let chain_id = self.chain_id.to_string();
        let response: ApiResponse = self
            .client
            .get(&self.api_url)
            .query(&[
                ("chainid", chain_id.as_str()),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        poll_status(response)
    }
}

impl SourceVerifier for EtherscanVerifier {
    async fn verify(
        &self,
        name: &str,
        address: Address,
        args: &[DynSolValue],
    ) -> Result<VerificationStatus, VerificationError> {
        let artifact = self.artifacts.find(name)?;
        let build_info = artifact.build_info()?;
        let constructor_args = hex::encode(artifact.encode_constructor_args(args)?);

        let form = [
            ("module", "contract".to_owned()),
            ("action", "verifysourcecode".to_owned()),
            ("apikey", self.api_key.clone()),
            ("contractaddress", address.to_string()),
            ("sourceCode", serde_json::to_string(&build_info.input)?),
            ("codeformat", "solidity-standard-json-input".to_owned()),
            ("contractname", artifact.qualified_name()),
            ("compilerversion", format!("v{}", build_info.solc_long_version)),
            // Sic: the API spells it this way.
            ("constructorArguements", constructor_args),
        ];
        let response: ApiResponse = self
            .client
            .post(&self.api_url)
            .query(&[("chainid", self.chain_id)])
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let guid = match submission(response)? {
            Submission::Queued(guid) => guid,
            Submission::AlreadyVerified => return Ok(VerificationStatus::AlreadyVerified),
        };
        debug!(@grey, "verification queued with guid {guid}");

        for _ in 0..self.max_polls {
            tokio::time::sleep(self.poll_interval).await;
            match self.check_status(&guid).await? {
                PollStatus::Pending => continue,
                PollStatus::Done(status) => return Ok(status),
            }
        }
        Err(VerificationError::TimedOut {
            polls: self.max_polls,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Submission {
    Queued(String),
    AlreadyVerified,
}

#[derive(Debug, PartialEq, Eq)]
enum PollStatus {
    Pending,
    Done(VerificationStatus),
}

fn is_already_verified(result: &str) -> bool {
    result.to_lowercase().contains("already verified")
}

fn submission(response: ApiResponse) -> Result<Submission, VerificationError> {
    if is_already_verified(&response.result) {
        Ok(Submission::AlreadyVerified)
    } else if response.status == "1" {
        Ok(Submission::Queued(response.result))
    } else {
        Err(VerificationError::Rejected(format!(
            "{}: {}",
            response.message, response.result
        )))
    }
}

fn poll_status(response: ApiResponse) -> Result<PollStatus, VerificationError> {
    let result = response.result.as_str();
    if result.starts_with("Pending") {
        Ok(PollStatus::Pending)
    } else if is_already_verified(result) {
        Ok(PollStatus::Done(VerificationStatus::AlreadyVerified))
    } else if response.status == "1" && result.starts_with("Pass") {
        Ok(PollStatus::Done(VerificationStatus::Verified))
    } else {
        Err(VerificationError::Failed(result.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, result: &str) -> ApiResponse {
        ApiResponse {
            status: status.into(),
            message: if status == "1" { "OK" } else { "NOTOK" }.into(),
            result: result.into(),
        }
    }

    #[test]
    fn submission_outcomes() {
        assert_eq!(
            submission(response("1", "ezq8xqsmbbcn1ptgw6rfvm5dhjdusmtq")).unwrap(),
            Submission::Queued("ezq8xqsmbbcn1ptgw6rfvm5dhjdusmtq".into())
        );
        assert_eq!(
            submission(response("0", "Contract source code already verified")).unwrap(),
            Submission::AlreadyVerified
        );
        assert!(matches!(
            submission(response("0", "Invalid API Key")),
            Err(VerificationError::Rejected(msg)) if msg.contains("Invalid API Key")
        ));
    }

    #[test]
    fn poll_outcomes() {
        assert_eq!(
            poll_status(response("0", "Pending in queue")).unwrap(),
            PollStatus::Pending
        );
        assert_eq!(
            poll_status(response("1", "Pass - Verified")).unwrap(),
            PollStatus::Done(VerificationStatus::Verified)
        );
        assert_eq!(
            poll_status(response("1", "Already Verified")).unwrap(),
            PollStatus::Done(VerificationStatus::AlreadyVerified)
        );
        assert!(matches!(
            poll_status(response("0", "Fail - Unable to verify")),
            Err(VerificationError::Failed(_))
        ));
    }

    #[test]
    fn parses_api_json() {
        let parsed: ApiResponse =
            serde_json::from_str(r#"{"status":"1","message":"OK","result":"abc"}"#).unwrap();
        assert_eq!(submission(parsed).unwrap(), Submission::Queued("abc".into()));
    }
}
