//! S3-backed object store.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sift_error::{Result, StoreError};
use tracing::trace;

use super::{ListPage, ObjectStore};

/// Configuration for S3 access.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,

    /// Optional prefix limiting the listing
    pub prefix: Option<String>,

    /// AWS region
    pub region: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// AWS profile name (optional)
    pub profile: Option<String>,
}

impl S3Config {
    /// Create a new S3Config with the required bucket name.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint (for LocalStack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}

/// Create an S3 client from configuration.
///
/// Credentials come from the default AWS provider chain.
pub async fn create_s3_client(config: &S3Config) -> Result<Client> {
    use aws_config::Region;

    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }

    let sdk_config = loader.load().await;
    let builder = aws_sdk_s3::config::Builder::from(&sdk_config);

    // LocalStack needs path-style addressing
    let s3_config = if config.endpoint.is_some() {
        builder.force_path_style(true).build()
    } else {
        builder.build()
    };

    Ok(Client::from_conf(s3_config))
}

/// An S3 bucket listed with `ListObjects` start markers.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
    prefix: Option<String>,
}

impl S3Store {
    pub fn new(client: Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_page(&self, marker: &str, max_keys: usize) -> Result<ListPage> {
        let mut req = self
            .client
            .list_objects()
            .bucket(&self.bucket)
            .max_keys(i32::try_from(max_keys).unwrap_or(i32::MAX));

        if let Some(prefix) = &self.prefix {
            req = req.prefix(prefix);
        }

        if !marker.is_empty() {
            req = req.marker(marker);
        }

        let resp = req.send().await.map_err(|e| StoreError::List {
            bucket: self.bucket.clone(),
            message: DisplayErrorContext(&e).to_string(),
        })?;

        let keys: Vec<String> = resp
            .contents
            .unwrap_or_default()
            .into_iter()
            .filter_map(|obj| obj.key)
            .collect();

        trace!(
            bucket = %self.bucket,
            marker = marker,
            keys = keys.len(),
            "Listed page"
        );

        Ok(ListPage {
            keys,
            truncated: resp.is_truncated == Some(true),
        })
    }

    async fn fetch(&self, key: &str) -> Result<Bytes> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::Fetch {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let body = result.body.collect().await.map_err(|e| StoreError::Fetch {
            key: key.to_string(),
            message: format!("could not read bytes: {e}"),
        })?;

        Ok(body.into_bytes())
    }

    fn describe(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("s3://{}/{}", self.bucket, prefix),
            None => format!("s3://{}", self.bucket),
        }
    }
}
