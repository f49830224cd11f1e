#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![allow(clippy::result_large_err, clippy::large_enum_variant)]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "s3mock_client::client";
pub const TRACING_TARGET_FACTORY: &str = "s3mock_client::factory";
pub const TRACING_TARGET_HADOOP: &str = "s3mock_client::hadoop";

pub mod client;
pub mod factory;
pub mod hadoop;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

// Re-export for convenience
pub use crate::client::{
    CredentialsProvider, S3Client, S3ClientConfig, S3ClientOptions, S3Credentials,
    SharedCredentialsProvider, StaticCredentialsProvider, StorageClient,
};
pub use crate::factory::{DefaultS3ClientFactory, NonChunkedS3ClientFactory, S3ClientFactory};
pub use crate::hadoop::{SparkS3Config, convert_s3_to_s3a_paths, to_s3a_uri};

/// Error type for S3 client construction and configuration.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    ///
    /// This includes malformed endpoints, invalid bucket names, and
    /// other issues detected before any client is built.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The credentials provider could not yield usable keys.
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// The underlying object store could not be set up.
    #[error("Client setup failed: {0}")]
    Setup(#[from] object_store::Error),

    /// The client does not accept option changes after construction.
    #[error("Client `{0}` does not support runtime option changes")]
    UnsupportedOptions(String),
}

impl Error {
    /// Returns whether this error indicates a configuration issue.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Returns whether this error was raised while building the backing store.
    pub fn is_setup_error(&self) -> bool {
        matches!(self, Error::Setup(_) | Error::UnsupportedOptions(_))
    }

    /// Returns whether this error came from a client that rejects option changes.
    pub fn is_unsupported_options(&self) -> bool {
        matches!(self, Error::UnsupportedOptions(_))
    }
}

/// Specialized [`Result`] type for S3 client operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
