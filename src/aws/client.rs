//! CloudFront Client
//!
//! Implements [`DistributionApi`] on the AWS SDK client. Credentials,
//! signing, retries and response decoding come from the SDK; this layer
//! turns its typed outputs into documents and its errors into
//! [`TransportError`].

use super::document::ToJson;
use super::session::{DistributionApi, DistributionResponse};
use crate::error::{FetchError, TransportError};
use async_trait::async_trait;
use aws_sdk_cloudfront::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use serde_json::Value;

/// Main CloudFront client
#[derive(Clone, Debug)]
pub struct CloudFrontClient {
    pub client: aws_sdk_cloudfront::Client,
}

impl CloudFrontClient {
    pub fn new(client: aws_sdk_cloudfront::Client) -> Self {
        Self { client }
    }

    /// Create a client from a service configuration
    pub fn from_conf(config: aws_sdk_cloudfront::Config) -> Self {
        Self::new(aws_sdk_cloudfront::Client::from_conf(config))
    }
}

/// Map an SDK failure onto the transport taxonomy
///
/// Anything that got an HTTP error response back keeps its status and the
/// provider's error code; the rest (credentials, DNS, timeouts) is a
/// request failure.
pub fn transport_error<E>(operation: &str, err: SdkError<E>) -> TransportError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|response| response.status().as_u16());
    let error = match status {
        Some(status) if !(200..300).contains(&status) => TransportError::Status {
            status,
            code: err.code().unwrap_or("Unknown").to_string(),
            message: err.message().unwrap_or_default().to_string(),
        },
        _ => TransportError::Request(DisplayErrorContext(&err).to_string()),
    };
    tracing::error!("{} failed: {}", operation, error);
    error
}

#[async_trait]
impl DistributionApi for CloudFrontClient {
    async fn list_distributions(&self, marker: Option<&str>) -> Result<Value, TransportError> {
        tracing::debug!("ListDistributions marker={:?}", marker);
        let output = self
            .client
            .list_distributions()
            .set_marker(marker.map(str::to_string))
            .send()
            .await
            .map_err(|e| transport_error("ListDistributions", e))?;

        output
            .distribution_list()
            .map(ToJson::to_json)
            .ok_or_else(|| TransportError::Decode("ListDistributions returned no DistributionList".to_string()))
    }

    async fn get_distribution(&self, id: &str) -> Result<DistributionResponse, TransportError> {
        tracing::debug!("GetDistribution id={}", id);
        let output = self
            .client
            .get_distribution()
            .id(id)
            .send()
            .await
            .map_err(|e| transport_error("GetDistribution", e))?;

        let distribution = output
            .distribution()
            .map(ToJson::to_json)
            .ok_or_else(|| TransportError::Decode(format!("GetDistribution {} returned no Distribution", id)))?;

        Ok(DistributionResponse {
            distribution,
            etag: output.e_tag().map(str::to_string),
        })
    }

    async fn list_tags_for_resource(&self, arn: &str) -> Result<Value, TransportError> {
        tracing::debug!("ListTagsForResource resource={}", arn);
        let output = self
            .client
            .list_tags_for_resource()
            .resource(arn)
            .send()
            .await
            .map_err(|e| transport_error("ListTagsForResource", e))?;

        Ok(output.tags().to_json())
    }
}

/// Format a CloudFront API error for display
/// Security: Sanitizes error messages to avoid leaking sensitive API details
pub fn format_aws_error(error: &anyhow::Error) -> String {
    let transport = error.chain().find_map(|cause| {
        cause
            .downcast_ref::<TransportError>()
            .or_else(|| match cause.downcast_ref::<FetchError>() {
                Some(FetchError::Transport(t)) => Some(t),
                _ => None,
            })
    });

    if let Some(status) = transport.and_then(|t| t.status()) {
        match status {
            401 | 403 => {
                return "Access denied. Check your AWS credentials and IAM permissions.".to_string()
            }
            404 => return "Resource not found.".to_string(),
            429 => return "Request throttled. Please try again later.".to_string(),
            400 => return "Invalid request. Check your parameters.".to_string(),
            500..=599 => {
                return "CloudFront service temporarily unavailable. Please try again.".to_string()
            }
            _ => return "Request failed. Check your network connection and try again.".to_string(),
        }
    }

    let error_str = error.to_string();

    // Truncate long error messages and remove potential sensitive data
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
