//! Base factory backed by [`object_store`].

use std::sync::Arc;

use tracing::instrument;
use url::Url;

use super::S3ClientFactory;
use crate::client::{
    S3Client, S3ClientConfig, S3ClientOptions, SharedCredentialsProvider, mask_endpoint,
};
use crate::{Result, TRACING_TARGET_FACTORY};

/// Builds [`S3Client`]s with AWS SDK default options.
///
/// Clients report chunked encoding enabled and use virtual-hosted-style
/// addressing until reconfigured. Request bodies are always sent whole.
#[derive(Debug, Clone, Default)]
pub struct DefaultS3ClientFactory {
    config: Arc<S3ClientConfig>,
}

impl DefaultS3ClientFactory {
    /// Creates a factory sharing `config` across every client it builds.
    pub fn new(config: S3ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &S3ClientConfig {
        &self.config
    }
}

impl S3ClientFactory for DefaultS3ClientFactory {
    type Client = S3Client;

    #[instrument(
        skip(self, endpoint, credentials),
        target = TRACING_TARGET_FACTORY,
        fields(endpoint = %mask_endpoint(endpoint))
    )]
    fn create_s3_client(
        &self,
        endpoint: &Url,
        bucket: &str,
        credentials: &SharedCredentialsProvider,
    ) -> Result<Self::Client> {
        S3Client::connect(
            endpoint,
            bucket,
            credentials,
            Arc::clone(&self.config),
            S3ClientOptions::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, StaticCredentialsProvider, StorageClient};

    #[test]
    fn test_default_factory_uses_sdk_defaults() {
        let factory = DefaultS3ClientFactory::default();
        let endpoint = Url::parse("https://s3.example.com").unwrap();
        let credentials = StaticCredentialsProvider::new("access", "secret").into_shared();

        let client = factory
            .create_s3_client(&endpoint, "my-bucket", &credentials)
            .unwrap();

        assert_eq!(client.client_options(), S3ClientOptions::default());
        assert_eq!(client.config(), factory.config());
    }

    #[test]
    fn test_default_factory_shares_credentials_provider() {
        let factory = DefaultS3ClientFactory::default();
        let endpoint = Url::parse("https://s3.example.com").unwrap();
        let credentials = StaticCredentialsProvider::new("access", "secret").into_shared();

        let client = factory
            .create_s3_client(&endpoint, "my-bucket", &credentials)
            .unwrap();

        assert!(Arc::ptr_eq(client.credentials_provider(), &credentials));
    }

    #[test]
    fn test_default_factory_rejects_invalid_config() {
        let factory = DefaultS3ClientFactory::new(S3ClientConfig::new(""));
        let endpoint = Url::parse("https://s3.example.com").unwrap();
        let credentials = StaticCredentialsProvider::new("access", "secret").into_shared();

        let result = factory.create_s3_client(&endpoint, "my-bucket", &credentials);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
