// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Network(#[from] crate::core::network::NetworkError),
    #[error("{0}")]
    Manifest(#[from] crate::core::manifest::ManifestError),
    #[error("{0}")]
    Artifact(#[from] crate::core::artifact::ArtifactError),
    #[error("subscription error: {0}")]
    Subscription(#[from] crate::core::subscription::SubscriptionError),
    #[error("deployment error: {0}")]
    Deployment(#[from] crate::core::deployment::DeploymentError),
    #[error("{0}")]
    Record(#[from] crate::core::deployment::record::RecordError),
    #[error("consumer registration error: {0}")]
    Registration(#[from] crate::core::registration::RegistrationError),
    #[error("{0}")]
    Verification(#[from] crate::core::verification::VerificationError),
}
