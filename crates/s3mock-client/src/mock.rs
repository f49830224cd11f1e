//! Mock factories and clients for testing.
//!
//! These stand in for a real base factory so that decorators such as
//! [`NonChunkedS3ClientFactory`] can be tested without a storage backend.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! s3mock-client = { version = "...", features = ["test-utils"] }
//! ```
//!
//! [`NonChunkedS3ClientFactory`]: crate::NonChunkedS3ClientFactory

use std::sync::{Mutex, PoisonError};

use url::Url;

use crate::client::{S3ClientOptions, SharedCredentialsProvider, StorageClient};
use crate::factory::S3ClientFactory;
use crate::{Error, Result};

/// Inputs received by a single [`MockS3ClientFactory::create_s3_client`] call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Endpoint as passed in.
    pub endpoint: Url,
    /// Bucket as passed in.
    pub bucket: String,
    /// Credentials provider as passed in.
    pub credentials: SharedCredentialsProvider,
}

/// Client produced by [`MockS3ClientFactory`].
#[derive(Debug, Clone)]
pub struct MockS3Client {
    /// Endpoint the client was created for.
    pub endpoint: Url,
    /// Bucket the client was created for.
    pub bucket: String,
    /// Credentials provider the client was created with.
    pub credentials: SharedCredentialsProvider,
    options: S3ClientOptions,
    options_set: usize,
}

impl MockS3Client {
    /// Returns how many times options were applied after construction.
    pub fn options_set_count(&self) -> usize {
        self.options_set
    }
}

impl StorageClient for MockS3Client {
    fn client_options(&self) -> S3ClientOptions {
        self.options
    }

    fn set_client_options(&mut self, options: S3ClientOptions) -> Result<()> {
        self.options = options;
        self.options_set += 1;
        Ok(())
    }
}

/// Client that keeps its construction-time options forever.
#[derive(Debug, Clone, Default)]
pub struct FrozenS3Client {
    options: S3ClientOptions,
}

impl StorageClient for FrozenS3Client {
    fn client_options(&self) -> S3ClientOptions {
        self.options
    }
}

/// Factory that records its inputs and returns [`MockS3Client`]s.
#[derive(Debug, Default)]
pub struct MockS3ClientFactory {
    initial_options: S3ClientOptions,
    failure: Option<fn() -> Error>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockS3ClientFactory {
    /// Creates a factory whose clients start with SDK default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the options every produced client starts with.
    pub fn with_initial_options(mut self, options: S3ClientOptions) -> Self {
        self.initial_options = options;
        self
    }

    /// Creates a factory that fails every call with the error `failure` builds.
    pub fn failing(failure: fn() -> Error) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    /// Returns the inputs of every call made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl S3ClientFactory for MockS3ClientFactory {
    type Client = MockS3Client;

    fn create_s3_client(
        &self,
        endpoint: &Url,
        bucket: &str,
        credentials: &SharedCredentialsProvider,
    ) -> Result<Self::Client> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                endpoint: endpoint.clone(),
                bucket: bucket.to_string(),
                credentials: credentials.clone(),
            });

        if let Some(failure) = self.failure {
            return Err(failure());
        }

        Ok(MockS3Client {
            endpoint: endpoint.clone(),
            bucket: bucket.to_string(),
            credentials: credentials.clone(),
            options: self.initial_options,
            options_set: 0,
        })
    }
}

/// Factory producing [`FrozenS3Client`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenS3ClientFactory;

impl S3ClientFactory for FrozenS3ClientFactory {
    type Client = FrozenS3Client;

    fn create_s3_client(
        &self,
        _endpoint: &Url,
        _bucket: &str,
        _credentials: &SharedCredentialsProvider,
    ) -> Result<Self::Client> {
        Ok(FrozenS3Client::default())
    }
}
