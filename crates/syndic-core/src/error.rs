//! Shared error type across syndic crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, SyndicError>;

/// Unified error type used by core and the reconciler.
#[derive(Debug, Error)]
pub enum SyndicError {
    #[error("manifest read failed: {0}")]
    ManifestRead(String),
    #[error("invalid manifest: {0}")]
    ManifestParse(String),
    #[error("manifest validation failed: {0}")]
    ManifestInvalid(String),
    #[error("request build failed: {0}")]
    RequestBuild(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("cluster returned status {status} for {url}")]
    ClusterStatus { status: u16, url: String },
}
