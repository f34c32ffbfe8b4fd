//! Distribution records
//!
//! Typed views over decoded CloudFront documents. Scalars the resolver
//! routes on are typed; nested configuration blocks stay as JSON in the
//! provider's own shape (`{"Quantity": .., "Items": [..]}`).

use crate::error::FetchError;
use chrono::{DateTime, Utc};
use serde_json::Value;

fn field(obj: &Value, name: &str) -> Value {
    obj.get(name).cloned().unwrap_or(Value::Null)
}

fn optional_str(obj: &Value, name: &str) -> Option<String> {
    obj.get(name).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn required_str(obj: &Value, name: &str, what: &str) -> Result<String, FetchError> {
    optional_str(obj, name)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FetchError::malformed(format!("{} is missing {}", what, name)))
}

fn flag(obj: &Value, name: &str) -> bool {
    obj.get(name).and_then(|v| v.as_bool()).unwrap_or(false)
}

fn timestamp(obj: &Value, name: &str, what: &str) -> Result<Option<DateTime<Utc>>, FetchError> {
    let Some(raw) = obj.get(name).and_then(|v| v.as_str()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|e| FetchError::malformed(format!("{} has invalid {} '{}': {}", what, name, raw, e)))
}

/// Configuration values shared by a listing summary and a `DistributionConfig`
///
/// Both documents use the same element names for these, so one parser serves
/// the listing path and the detail path.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    pub enabled: bool,
    pub comment: Option<String>,
    pub price_class: Option<String>,
    pub http_version: Option<String>,
    pub is_ipv6_enabled: bool,
    pub web_acl_id: Option<String>,
    pub aliases: Value,
    pub origins: Value,
    pub origin_groups: Value,
    pub default_cache_behavior: Value,
    pub cache_behaviors: Value,
    pub custom_error_responses: Value,
    pub restrictions: Value,
    pub viewer_certificate: Value,
}

impl SummaryConfig {
    pub fn from_value(obj: &Value) -> Self {
        Self {
            enabled: flag(obj, "Enabled"),
            comment: optional_str(obj, "Comment"),
            price_class: optional_str(obj, "PriceClass"),
            http_version: optional_str(obj, "HttpVersion"),
            is_ipv6_enabled: flag(obj, "IsIPV6Enabled"),
            web_acl_id: optional_str(obj, "WebACLId"),
            aliases: field(obj, "Aliases"),
            origins: field(obj, "Origins"),
            origin_groups: field(obj, "OriginGroups"),
            default_cache_behavior: field(obj, "DefaultCacheBehavior"),
            cache_behaviors: field(obj, "CacheBehaviors"),
            custom_error_responses: field(obj, "CustomErrorResponses"),
            restrictions: field(obj, "Restrictions"),
            viewer_certificate: field(obj, "ViewerCertificate"),
        }
    }
}

/// One item of the listing call
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    pub id: String,
    pub arn: String,
    pub status: Option<String>,
    pub domain_name: Option<String>,
    pub last_modified_time: Option<DateTime<Utc>>,
    pub alias_icp_recordals: Value,
    pub config: SummaryConfig,
}

impl DistributionSummary {
    /// Build a summary from a `<DistributionSummary>` or `<Distribution>` element
    ///
    /// Configuration values are read from `config`, which is the element itself
    /// for listing items and its `DistributionConfig` for detail responses.
    pub fn from_parts(identity: &Value, config: &Value) -> Result<Self, FetchError> {
        if !identity.is_object() {
            return Err(FetchError::malformed("distribution entry is not an element"));
        }
        Ok(Self {
            id: required_str(identity, "Id", "distribution")?,
            arn: required_str(identity, "ARN", "distribution")?,
            status: optional_str(identity, "Status"),
            domain_name: optional_str(identity, "DomainName"),
            last_modified_time: timestamp(identity, "LastModifiedTime", "distribution")?,
            alias_icp_recordals: field(identity, "AliasICPRecordals"),
            config: SummaryConfig::from_value(config),
        })
    }

    /// Build a summary from a listing item
    pub fn from_value(item: &Value) -> Result<Self, FetchError> {
        Self::from_parts(item, item)
    }
}

/// Full view returned by the detail call
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionDetail {
    /// Summary-shaped view synthesized from the detail response
    pub summary: DistributionSummary,
    /// The complete `DistributionConfig` element
    pub config: Value,
    pub active_trusted_key_groups: Value,
    pub active_trusted_signers: Value,
    pub in_progress_invalidation_batches: i64,
    /// Version tag of this read
    pub etag: Option<String>,
}

impl DistributionDetail {
    pub fn default_root_object(&self) -> Option<&str> {
        self.config
            .get("DefaultRootObject")
            .and_then(|v| v.as_str())
    }
}
