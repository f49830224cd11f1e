//! S3 client handle and the option-mutation seam.
//!
//! [`S3Client`] owns everything needed to talk to one bucket: the endpoint,
//! the bucket name, the caller's credentials provider, and the current
//! [`S3ClientOptions`]. The backing [`ObjectStore`] is built lazily from
//! those inputs and discarded whenever the options change.

use std::fmt;
use std::sync::{Arc, OnceLock};

use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use tracing::{debug, error, info, instrument};
use url::Url;

use super::{S3ClientConfig, S3ClientOptions, SharedCredentialsProvider};
use crate::{Error, Result, TRACING_TARGET_CLIENT};

/// Key requested by [`S3Client::verify_reachable`].
const VERIFY_KEY: &str = "_s3mock_verify_reachable";

/// A storage client whose request options can be replaced after construction.
pub trait StorageClient: Send + Sync {
    /// Returns the options currently in effect.
    fn client_options(&self) -> S3ClientOptions;

    /// Replaces the client's options in place.
    ///
    /// Clients that cannot change options after construction keep the
    /// default, which reports [`Error::UnsupportedOptions`].
    fn set_client_options(&mut self, options: S3ClientOptions) -> Result<()> {
        let _ = options;
        Err(Error::UnsupportedOptions(
            std::any::type_name::<Self>().to_string(),
        ))
    }
}

/// S3 client bound to a single endpoint and bucket.
#[derive(Clone)]
pub struct S3Client {
    endpoint: Url,
    bucket: String,
    credentials: SharedCredentialsProvider,
    config: Arc<S3ClientConfig>,
    options: S3ClientOptions,
    store: OnceLock<Arc<dyn ObjectStore>>,
}

impl S3Client {
    /// Validates the inputs and creates a client with the given options.
    ///
    /// The credentials provider is resolved once here so that missing keys
    /// surface at construction. No network request is made.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint is not an `http`/`https` URL with a host
    /// - The bucket name is not a valid S3 bucket name
    /// - The configuration is invalid
    /// - The credentials provider fails
    #[instrument(
        skip(endpoint, credentials, config),
        target = TRACING_TARGET_CLIENT,
        fields(endpoint = %mask_endpoint(endpoint))
    )]
    pub fn connect(
        endpoint: &Url,
        bucket: &str,
        credentials: &SharedCredentialsProvider,
        config: Arc<S3ClientConfig>,
        options: S3ClientOptions,
    ) -> Result<Self> {
        validate_endpoint(endpoint)?;
        validate_bucket(bucket)?;
        config.validate()?;

        let resolved = credentials.credentials().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Failed to resolve credentials");
            e
        })?;

        info!(
            target: TRACING_TARGET_CLIENT,
            access_key = %resolved.access_key_masked(),
            region = config.region(),
            chunked_encoding_disabled = options.is_chunked_encoding_disabled(),
            path_style = options.is_path_style_access(),
            "S3 client initialized"
        );

        Ok(Self {
            endpoint: endpoint.clone(),
            bucket: bucket.to_string(),
            credentials: Arc::clone(credentials),
            config,
            options,
            store: OnceLock::new(),
        })
    }

    /// Returns the service endpoint.
    #[inline]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the bucket name.
    #[inline]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns the credentials provider shared with the caller.
    #[inline]
    pub fn credentials_provider(&self) -> &SharedCredentialsProvider {
        &self.credentials
    }

    /// Returns the factory configuration.
    #[inline]
    pub fn config(&self) -> &S3ClientConfig {
        &self.config
    }

    /// Renders the request URL for `key` under the current addressing mode.
    ///
    /// Path style yields `{endpoint}/{bucket}/{key}`, virtual-hosted style
    /// yields `{scheme}://{bucket}.{host}/{key}`.
    pub fn object_url(&self, key: &str) -> Result<Url> {
        let mut url = if self.options.is_path_style_access() {
            let mut url = self.endpoint.clone();
            push_segments(&mut url, [self.bucket.as_str()])?;
            url
        } else {
            virtual_hosted_endpoint(&self.endpoint, &self.bucket)?
        };

        push_segments(&mut url, key.trim_start_matches('/').split('/'))?;
        Ok(url)
    }

    /// Returns the backing object store, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials provider fails or the store
    /// cannot be configured for the current addressing mode.
    pub fn object_store(&self) -> Result<Arc<dyn ObjectStore>> {
        if let Some(store) = self.store.get() {
            return Ok(Arc::clone(store));
        }

        let store = self.build_store()?;
        Ok(Arc::clone(self.store.get_or_init(|| store)))
    }

    /// Verifies that the bucket is reachable.
    ///
    /// Issues a HEAD for a fixed sentinel key. A not-found response counts as
    /// success, any other error is propagated.
    #[instrument(skip(self), target = TRACING_TARGET_CLIENT, fields(bucket = %self.bucket))]
    pub async fn verify_reachable(&self) -> Result<()> {
        let store = self.object_store()?;
        match store.head(&Path::from(VERIFY_KEY)).await {
            Ok(_) | Err(object_store::Error::NotFound { .. }) => {
                debug!(target: TRACING_TARGET_CLIENT, "Bucket reachable");
                Ok(())
            }
            Err(e) => {
                error!(target: TRACING_TARGET_CLIENT, error = %e, "Bucket unreachable");
                Err(Error::Setup(e))
            }
        }
    }

    fn build_store(&self) -> Result<Arc<dyn ObjectStore>> {
        let credentials = self.credentials.credentials()?;
        let virtual_hosted = !self.options.is_path_style_access();

        // object_store expects the bucket already present in a virtual-hosted endpoint.
        let endpoint = if virtual_hosted {
            virtual_hosted_endpoint(&self.endpoint, &self.bucket)?
        } else {
            self.endpoint.clone()
        };

        let mut builder = AmazonS3Builder::new()
            .with_endpoint(endpoint.as_str().trim_end_matches('/'))
            .with_bucket_name(&self.bucket)
            .with_region(self.config.region())
            .with_access_key_id(credentials.access_key())
            .with_secret_access_key(credentials.secret_key())
            .with_virtual_hosted_style_request(virtual_hosted)
            .with_client_options(self.config.client_options(endpoint.scheme() == "http"));

        if let Some(token) = credentials.session_token() {
            builder = builder.with_token(token);
        }

        let store = builder.build().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Failed to build object store");
            Error::Setup(e)
        })?;

        debug!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %mask_endpoint(&endpoint),
            virtual_hosted,
            "Object store built"
        );

        Ok(Arc::new(store))
    }
}

impl StorageClient for S3Client {
    fn client_options(&self) -> S3ClientOptions {
        self.options
    }

    fn set_client_options(&mut self, options: S3ClientOptions) -> Result<()> {
        if self.options != options {
            self.store = OnceLock::new();
        }

        self.options = options;
        Ok(())
    }
}

impl fmt::Debug for S3Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Client")
            .field("endpoint", &mask_endpoint(&self.endpoint))
            .field("bucket", &self.bucket)
            .field("region", &self.config.region())
            .field("options", &self.options)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Strips any userinfo from an endpoint for logging.
pub(crate) fn mask_endpoint(endpoint: &Url) -> String {
    let mut url = endpoint.clone();
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.to_string()
}

fn validate_endpoint(endpoint: &Url) -> Result<()> {
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "Invalid endpoint scheme '{}', expected 'http' or 'https'",
            endpoint.scheme()
        )));
    }

    if endpoint.host().is_none() {
        return Err(Error::Config(
            "Endpoint must include a valid hostname".to_string(),
        ));
    }

    Ok(())
}

/// Accepts DNS-compatible bucket names: 3 to 63 characters of lowercase
/// letters, digits, `.` and `-`, starting and ending with a letter or digit.
fn validate_bucket(bucket: &str) -> Result<()> {
    let valid_len = (3..=63).contains(&bucket.len());
    let valid_chars = bucket
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'-');
    let valid_edges = bucket
        .bytes()
        .next()
        .zip(bucket.bytes().next_back())
        .is_some_and(|(first, last)| first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric());

    if valid_len && valid_chars && valid_edges {
        Ok(())
    } else {
        Err(Error::Config(format!("Invalid bucket name '{bucket}'")))
    }
}

fn virtual_hosted_endpoint(endpoint: &Url, bucket: &str) -> Result<Url> {
    let host = endpoint
        .host_str()
        .ok_or_else(|| Error::Config("Endpoint must include a valid hostname".to_string()))?;

    let mut url = endpoint.clone();
    url.set_host(Some(&format!("{bucket}.{host}"))).map_err(|e| {
        Error::Config(format!(
            "Endpoint host '{host}' cannot carry bucket '{bucket}' as a subdomain: {e}"
        ))
    })?;

    Ok(url)
}

fn push_segments<'a>(url: &mut Url, segments: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let shown = url.to_string();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("Endpoint '{shown}' cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}
