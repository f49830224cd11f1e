//! S3 client, credentials, and configuration.
//!
//! ## Features
//!
//! - **Client**: [`S3Client`] bound to one endpoint and bucket, backed by
//!   [`object_store`]
//! - **Options**: [`S3ClientOptions`] controlling chunked encoding and
//!   bucket addressing, replaceable through [`StorageClient`]
//! - **Authentication**: [`CredentialsProvider`] with a static implementation
//! - **Configuration**: [`S3ClientConfig`] with region and timeouts

mod s3_client;
mod s3_config;
mod s3_credentials;
mod s3_options;

pub(crate) use s3_client::mask_endpoint;
pub use s3_client::{S3Client, StorageClient};
pub use s3_config::S3ClientConfig;
pub use s3_credentials::{
    CredentialsProvider, S3Credentials, SharedCredentialsProvider, StaticCredentialsProvider,
};
pub use s3_options::S3ClientOptions;
