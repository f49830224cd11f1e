//! Client factories.
//!
//! [`S3ClientFactory`] is the construction seam. Factories compose by
//! wrapping one another: [`NonChunkedS3ClientFactory`] delegates to any
//! inner factory and reconfigures what it returns.

use std::sync::Arc;

use url::Url;

use crate::Result;
use crate::client::{SharedCredentialsProvider, StorageClient};

mod default_factory;
mod non_chunked;

pub use default_factory::DefaultS3ClientFactory;
pub use non_chunked::NonChunkedS3ClientFactory;

/// Factory for storage clients bound to an endpoint and bucket.
pub trait S3ClientFactory: Send + Sync {
    /// The client type produced by [`create_s3_client`](Self::create_s3_client).
    type Client: StorageClient;

    /// Creates a client for `bucket` at `endpoint`, authenticated through
    /// `credentials`.
    ///
    /// The inputs stay owned by the caller; the client may keep its own
    /// handle to the credentials provider.
    fn create_s3_client(
        &self,
        endpoint: &Url,
        bucket: &str,
        credentials: &SharedCredentialsProvider,
    ) -> Result<Self::Client>;
}

impl<F> S3ClientFactory for &F
where
    F: S3ClientFactory + ?Sized,
{
    type Client = F::Client;

    fn create_s3_client(
        &self,
        endpoint: &Url,
        bucket: &str,
        credentials: &SharedCredentialsProvider,
    ) -> Result<Self::Client> {
        (**self).create_s3_client(endpoint, bucket, credentials)
    }
}

impl<F> S3ClientFactory for Arc<F>
where
    F: S3ClientFactory + ?Sized,
{
    type Client = F::Client;

    fn create_s3_client(
        &self,
        endpoint: &Url,
        bucket: &str,
        credentials: &SharedCredentialsProvider,
    ) -> Result<Self::Client> {
        (**self).create_s3_client(endpoint, bucket, credentials)
    }
}
