//! Default factory configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use object_store::ClientOptions;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// Default values
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Settings shared by every client a [`DefaultS3ClientFactory`] builds.
///
/// Endpoint, bucket and credentials are per-call inputs and live elsewhere.
///
/// [`DefaultS3ClientFactory`]: crate::DefaultS3ClientFactory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct S3ClientConfig {
    /// Signing region. Mock servers usually accept any value.
    #[cfg_attr(
        feature = "config",
        arg(long = "s3-region", env = "S3_REGION", default_value = DEFAULT_REGION)
    )]
    #[serde(default = "default_region")]
    pub s3_region: String,

    /// Connection timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(
            long = "s3-connect-timeout",
            env = "S3_CONNECT_TIMEOUT_SECS",
            default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS
        )
    )]
    #[serde(default = "default_connect_timeout")]
    pub s3_connect_timeout: u64,

    /// Request timeout in seconds, including body transfer
    #[cfg_attr(
        feature = "config",
        arg(
            long = "s3-request-timeout",
            env = "S3_REQUEST_TIMEOUT_SECS",
            default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
        )
    )]
    #[serde(default = "default_request_timeout")]
    pub s3_request_timeout: u64,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl S3ClientConfig {
    /// Creates a configuration for the given region with default timeouts.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            s3_region: region.into(),
            ..Self::default()
        }
    }

    /// Sets the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.s3_connect_timeout = timeout.as_secs();
        self
    }

    /// Sets the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.s3_request_timeout = timeout.as_secs();
        self
    }

    /// Returns the signing region.
    #[inline]
    pub fn region(&self) -> &str {
        &self.s3_region
    }

    /// Returns the connection timeout as a Duration.
    #[inline]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.s3_connect_timeout)
    }

    /// Returns the request timeout as a Duration.
    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.s3_request_timeout)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the region is blank or a timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.s3_region.trim().is_empty() {
            return Err(Error::Config("Region cannot be empty".to_string()));
        }

        if self.s3_connect_timeout == 0 {
            return Err(Error::Config(
                "Connect timeout must be greater than zero".to_string(),
            ));
        }

        if self.s3_request_timeout == 0 {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if self.s3_request_timeout < 10 {
            tracing::warn!(
                target: crate::TRACING_TARGET_CLIENT,
                timeout = ?self.request_timeout(),
                "Request timeout is very short and may cause operation failures"
            );
        }

        Ok(())
    }

    /// Builds HTTP client options for the backing store.
    pub(crate) fn client_options(&self, allow_http: bool) -> ClientOptions {
        ClientOptions::new()
            .with_allow_http(allow_http)
            .with_connect_timeout(self.connect_timeout())
            .with_timeout(self.request_timeout())
    }
}

impl Default for S3ClientConfig {
    fn default() -> Self {
        Self {
            s3_region: default_region(),
            s3_connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
            s3_request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = S3ClientConfig::default();
        assert_eq!(config.region(), "us-east-1");
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.request_timeout(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_methods() {
        let config = S3ClientConfig::new("eu-west-1")
            .with_connect_timeout(Duration::from_secs(5))
            .with_request_timeout(Duration::from_secs(60));

        assert_eq!(config.region(), "eu-west-1");
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_config_validation() {
        assert!(S3ClientConfig::new("  ").validate().is_err());

        let zero_connect = S3ClientConfig::default().with_connect_timeout(Duration::ZERO);
        assert!(matches!(zero_connect.validate(), Err(Error::Config(_))));

        let zero_request = S3ClientConfig::default().with_request_timeout(Duration::ZERO);
        assert!(matches!(zero_request.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: S3ClientConfig = serde_json::from_str(r#"{"s3_region":"local"}"#).unwrap();
        assert_eq!(config.region(), "local");
        assert_eq!(config.s3_connect_timeout, DEFAULT_CONNECT_TIMEOUT_SECS);
        assert_eq!(config.s3_request_timeout, DEFAULT_REQUEST_TIMEOUT_SECS);
    }
}
