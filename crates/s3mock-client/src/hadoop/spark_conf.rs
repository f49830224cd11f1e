//! Spark properties for running S3A against a mock endpoint.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::{S3ClientOptions, S3Credentials, StaticCredentialsProvider};
use crate::{Error, Result, TRACING_TARGET_HADOOP};

/// Prefix Spark uses to forward properties into the Hadoop configuration.
pub const SPARK_HADOOP_PREFIX: &str = "spark.hadoop.";

/// Hadoop filesystem implementation for the `s3a://` scheme.
pub const S3A_FILESYSTEM_CLASS: &str = "org.apache.hadoop.fs.s3a.S3AFileSystem";

/// JVM class of the non-chunked, path-style S3A client factory.
pub const NON_CHUNKED_CLIENT_FACTORY_CLASS: &str =
    "dev.sumitsu.s3mocktest.NonChunkedDefaultS3ClientFactory";

/// Connection settings for submitting Spark jobs against a mock S3 server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SparkS3Config {
    /// Mock S3 endpoint (e.g., "http://localhost:9000")
    #[cfg_attr(feature = "config", arg(long = "s3-endpoint", env = "S3_ENDPOINT"))]
    pub s3_endpoint: String,

    /// Access key ID presented to the mock server
    #[cfg_attr(
        feature = "config",
        arg(long = "s3-access-key-id", env = "S3_ACCESS_KEY_ID")
    )]
    pub s3_access_key_id: String,

    /// Secret access key presented to the mock server
    #[cfg_attr(
        feature = "config",
        arg(long = "s3-secret-access-key", env = "S3_SECRET_ACCESS_KEY")
    )]
    #[serde(skip_serializing, default)]
    pub s3_secret_access_key: String,

    /// JVM class S3A uses to build its S3 clients
    #[cfg_attr(
        feature = "config",
        arg(
            long = "s3a-client-factory-class",
            env = "S3A_CLIENT_FACTORY_CLASS",
            default_value = NON_CHUNKED_CLIENT_FACTORY_CLASS
        )
    )]
    #[serde(default = "default_client_factory_class")]
    pub client_factory_class: String,
}

fn default_client_factory_class() -> String {
    NON_CHUNKED_CLIENT_FACTORY_CLASS.to_string()
}

impl SparkS3Config {
    /// Creates a configuration using the non-chunked client factory.
    pub fn new(
        endpoint: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            s3_endpoint: endpoint.into(),
            s3_access_key_id: access_key_id.into(),
            s3_secret_access_key: secret_access_key.into(),
            client_factory_class: default_client_factory_class(),
        }
    }

    /// Overrides the client factory class.
    pub fn with_client_factory_class(mut self, class: impl Into<String>) -> Self {
        self.client_factory_class = class.into();
        self
    }

    /// Parses the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is not a valid URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.s3_endpoint).map_err(|e| {
            Error::Config(format!("Invalid S3 endpoint '{}': {e}", self.s3_endpoint))
        })
    }

    /// Returns a credentials provider for the configured keys.
    pub fn credentials_provider(&self) -> StaticCredentialsProvider {
        StaticCredentialsProvider::from(S3Credentials::new(
            &self.s3_access_key_id,
            &self.s3_secret_access_key,
        ))
    }

    /// Returns the S3A properties without the Spark prefix.
    pub fn hadoop_conf(&self) -> BTreeMap<String, String> {
        [
            ("fs.s3a.impl", S3A_FILESYSTEM_CLASS),
            ("fs.s3a.s3.client.factory.impl", self.client_factory_class.as_str()),
            ("fs.s3a.endpoint", self.s3_endpoint.as_str()),
            ("fs.s3a.access.key", self.s3_access_key_id.as_str()),
            ("fs.s3a.secret.key", self.s3_secret_access_key.as_str()),
            ("fs.s3a.path.style.access", "true"),
            ("fs.s3a.multiobjectdelete.enable", "false"),
            ("fs.s3a.change.detection.version.required", "false"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
    }

    /// Returns the S3A properties as `spark.hadoop.fs.s3a.*` Spark properties.
    pub fn to_spark_conf(&self) -> BTreeMap<String, String> {
        self.hadoop_conf()
            .into_iter()
            .map(|(key, value)| (format!("{SPARK_HADOOP_PREFIX}{key}"), value))
            .collect()
    }

    /// Merges the Spark properties into `conf`.
    ///
    /// Keys already present are overwritten; all other entries are kept.
    pub fn apply_to<C>(&self, conf: &mut C)
    where
        C: Extend<(String, String)>,
    {
        tracing::debug!(
            target: TRACING_TARGET_HADOOP,
            endpoint = %self.s3_endpoint,
            client_factory = %self.client_factory_class,
            "Applying mock S3 Spark configuration"
        );

        conf.extend(self.to_spark_conf());
    }

    /// Returns the client options S3A derives from these properties for `bucket`.
    pub fn client_options(&self, bucket: &str) -> S3ClientOptions {
        let conf: HashMap<String, String> = self.hadoop_conf().into_iter().collect();
        let options = S3ClientOptions::from_hadoop_conf(&conf, bucket);

        if self.client_factory_class == NON_CHUNKED_CLIENT_FACTORY_CLASS {
            options.disable_chunked_encoding()
        } else {
            options
        }
    }
}

impl fmt::Debug for SparkS3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparkS3Config")
            .field("s3_endpoint", &self.s3_endpoint)
            .field(
                "s3_access_key_id",
                &S3Credentials::new(&self.s3_access_key_id, "").access_key_masked(),
            )
            .field("s3_secret_access_key", &"***")
            .field("client_factory_class", &self.client_factory_class)
            .finish()
    }
}
