//! Per-client request options.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hadoop::s3a_property;

/// Request-shaping options applied to an [`S3Client`](super::S3Client).
///
/// The [`Default`] value records the AWS SDK defaults: chunked encoding
/// enabled and virtual-hosted-style addressing. The `object_store` transport
/// never sends `aws-chunked` frames, so the chunked flag is client state
/// reported through [`StorageClient::client_options`](super::StorageClient::client_options);
/// only the addressing mode changes requests on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct S3ClientOptions {
    /// Send request bodies in one piece instead of `aws-chunked` frames.
    #[serde(default)]
    chunked_encoding_disabled: bool,

    /// Address buckets as `endpoint/bucket/key` instead of `bucket.endpoint/key`.
    #[serde(default)]
    path_style_access: bool,
}

impl S3ClientOptions {
    /// Non-chunked bodies with path-style addressing, for S3-compatible
    /// servers that support neither `aws-chunked` nor bucket subdomains.
    pub const NON_CHUNKED_PATH_STYLE: Self = Self::new()
        .disable_chunked_encoding()
        .with_path_style_access(true);

    /// Creates options with SDK defaults.
    pub const fn new() -> Self {
        Self {
            chunked_encoding_disabled: false,
            path_style_access: false,
        }
    }

    /// Disables `aws-chunked` request bodies.
    pub const fn disable_chunked_encoding(mut self) -> Self {
        self.chunked_encoding_disabled = true;
        self
    }

    /// Sets whether to use path-style requests.
    pub const fn with_path_style_access(mut self, path_style_access: bool) -> Self {
        self.path_style_access = path_style_access;
        self
    }

    /// Returns whether chunked encoding is disabled.
    #[inline]
    pub const fn is_chunked_encoding_disabled(&self) -> bool {
        self.chunked_encoding_disabled
    }

    /// Returns whether path-style access is enabled.
    #[inline]
    pub const fn is_path_style_access(&self) -> bool {
        self.path_style_access
    }

    /// Reads options from Hadoop S3A properties (`fs.s3a.*`).
    ///
    /// `fs.s3a.bucket.<bucket>.path.style.access` takes precedence over
    /// `fs.s3a.path.style.access`. S3A has no chunked-encoding property, so
    /// that option keeps its default.
    pub fn from_hadoop_conf(conf: &HashMap<String, String>, bucket: &str) -> Self {
        let path_style = s3a_property(conf, bucket, "path.style.access")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        Self::new().with_path_style_access(path_style)
    }
}
