//! API session
//!
//! A [`Session`] is opened once per top-level operation and passed by
//! reference to the enumerator and fetchers. It wraps the three read calls
//! behind [`DistributionApi`] so the core never depends on the transport.

use super::client::CloudFrontClient;
use crate::error::TransportError;
use anyhow::Result;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use serde_json::Value;
use std::sync::Arc;

/// Response of `GetDistribution`
#[derive(Debug, Clone)]
pub struct DistributionResponse {
    /// `Distribution` document
    pub distribution: Value,
    /// Version tag of this read
    pub etag: Option<String>,
}

/// The read calls the core needs from the provider
#[async_trait]
pub trait DistributionApi: Send + Sync {
    /// One page of `ListDistributions`, starting after `marker`
    async fn list_distributions(&self, marker: Option<&str>) -> Result<Value, TransportError>;

    /// `GetDistribution` for a short id
    async fn get_distribution(&self, id: &str) -> Result<DistributionResponse, TransportError>;

    /// `ListTagsForResource` for an ARN
    async fn list_tags_for_resource(&self, arn: &str) -> Result<Value, TransportError>;
}

/// Region used when neither the caller nor the AWS environment names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Settings used to open a session
///
/// Unset fields fall through to the standard AWS chain: `AWS_REGION`,
/// `AWS_PROFILE`, `AWS_ENDPOINT_URL` and the shared config files.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Shared, read-only handle on the provider API
#[derive(Clone)]
pub struct Session {
    api: Arc<dyn DistributionApi>,
    region: String,
}

impl Session {
    /// Wrap an API implementation
    pub fn with_api(api: Arc<dyn DistributionApi>, region: &str) -> Self {
        Self {
            api,
            region: region.to_string(),
        }
    }

    pub fn api(&self) -> &dyn DistributionApi {
        self.api.as_ref()
    }

    /// Region the session was opened for
    pub fn region(&self) -> &str {
        &self.region
    }
}

/// Load the shared AWS configuration for a session
pub async fn load_sdk_config(config: &SessionConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.endpoint_url {
        tracing::info!("Using CloudFront endpoint override: {}", endpoint);
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}

/// Open a session against CloudFront
///
/// Credentials are resolved lazily by the SDK chain (environment, profiles
/// with SSO, role assumption or `credential_process`, web identity, container
/// and instance roles); a failure surfaces on the first call.
pub async fn open_session(config: &SessionConfig) -> Result<Session> {
    let sdk_config = load_sdk_config(config).await;
    Ok(session_from_sdk_config(&sdk_config))
}

/// Build a session from an already loaded shared configuration
pub fn session_from_sdk_config(sdk_config: &SdkConfig) -> Session {
    let region = sdk_config
        .region()
        .map(|r| r.to_string())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());
    tracing::info!("Opening CloudFront session for region {}", region);

    let service_config = aws_sdk_cloudfront::config::Builder::from(sdk_config)
        .region(Region::new(region.clone()))
        .build();

    Session::with_api(Arc::new(CloudFrontClient::from_conf(service_config)), &region)
}
