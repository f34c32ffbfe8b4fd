//! Column table
//!
//! Every output attribute is declared once here with the call it depends on
//! and the function that extracts it. The resolver reads the `source` of the
//! requested columns to decide which calls to make.

use super::model::{DistributionDetail, DistributionSummary};
use super::tags::{normalize, TagSet};
use crate::aws::arn::{arn_to_akas, Arn};
use crate::error::FetchError;
use serde_json::{json, Value};

/// An upstream call beyond the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Detail,
    Tags,
}

/// Where a column's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Summary,
    Detail,
    Tags,
    /// Computed from other values, possibly requiring a call
    Derived(Option<Dependency>),
}

impl Source {
    pub fn dependency(self) -> Option<Dependency> {
        match self {
            Source::Summary => None,
            Source::Detail => Some(Dependency::Detail),
            Source::Tags => Some(Dependency::Tags),
            Source::Derived(dependency) => dependency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Bool,
    Int,
    Timestamp,
    Json,
}

/// Everything a column may read for one item
pub struct Sources<'a> {
    /// Summary with detail configuration merged in when detail was fetched
    pub summary: &'a DistributionSummary,
    pub detail: Option<&'a DistributionDetail>,
    pub tags: Option<&'a TagSet>,
    /// Region of the session
    pub region: &'a str,
}

pub type Extract = fn(&Sources<'_>) -> Result<Value, FetchError>;

pub struct Column {
    pub name: &'static str,
    pub description: &'static str,
    pub column_type: ColumnType,
    pub source: Source,
    pub extract: Extract,
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("column_type", &self.column_type)
            .field("source", &self.source)
            .finish()
    }
}

fn detail_value(sources: &Sources<'_>, f: impl FnOnce(&DistributionDetail) -> Value) -> Value {
    sources.detail.map(f).unwrap_or(Value::Null)
}

pub static COLUMNS: &[Column] = &[
    Column {
        name: "id",
        description: "The identifier for the distribution.",
        column_type: ColumnType::String,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.id)),
    },
    Column {
        name: "enabled",
        description: "Whether the distribution is enabled to accept user requests for content.",
        column_type: ColumnType::Bool,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.config.enabled)),
    },
    Column {
        name: "e_tag",
        description: "The current version of the distribution's information.",
        column_type: ColumnType::String,
        source: Source::Detail,
        extract: |s| Ok(detail_value(s, |d| json!(d.etag))),
    },
    Column {
        name: "status",
        description: "The current status of the distribution. When the status is Deployed, the distribution's information is propagated to all CloudFront edge locations.",
        column_type: ColumnType::String,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.status)),
    },
    Column {
        name: "last_modified_time",
        description: "The date and time the distribution was last modified.",
        column_type: ColumnType::Timestamp,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.last_modified_time.map(|t| t.to_rfc3339()))),
    },
    Column {
        name: "domain_name",
        description: "The domain name that corresponds to the distribution, for example, d111111abcdef8.cloudfront.net.",
        column_type: ColumnType::String,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.domain_name)),
    },
    Column {
        name: "tags_src",
        description: "A list of tags assigned to the distribution.",
        column_type: ColumnType::Json,
        source: Source::Tags,
        extract: |s| Ok(s.tags.map(TagSet::to_pairs).unwrap_or(Value::Null)),
    },
    Column {
        name: "comment",
        description: "The comment originally specified when this distribution was created.",
        column_type: ColumnType::String,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.config.comment)),
    },
    Column {
        name: "http_version",
        description: "The maximum HTTP version that viewers can use to communicate with CloudFront.",
        column_type: ColumnType::String,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.config.http_version)),
    },
    Column {
        name: "is_ipv6_enabled",
        description: "Whether CloudFront responds to IPv6 DNS requests with an IPv6 address for the distribution.",
        column_type: ColumnType::Bool,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.config.is_ipv6_enabled)),
    },
    Column {
        name: "alias_icp_recordals",
        description: "The Internet Content Provider (ICP) recordal status for CNAMEs associated with the distribution (China regions).",
        column_type: ColumnType::Json,
        source: Source::Summary,
        extract: |s| Ok(s.summary.alias_icp_recordals.clone()),
    },
    Column {
        name: "custom_error_responses",
        description: "Custom error responses configured for the distribution.",
        column_type: ColumnType::Json,
        source: Source::Summary,
        extract: |s| Ok(s.summary.config.custom_error_responses.clone()),
    },
    Column {
        name: "default_cache_behavior",
        description: "The cache behavior used when a request matches no PathPattern of the cache behaviors.",
        column_type: ColumnType::Json,
        source: Source::Summary,
        extract: |s| Ok(s.summary.config.default_cache_behavior.clone()),
    },
    Column {
        name: "origin_groups",
        description: "The origin groups of the distribution.",
        column_type: ColumnType::Json,
        source: Source::Summary,
        extract: |s| Ok(s.summary.config.origin_groups.clone()),
    },
    Column {
        name: "restrictions",
        description: "Geographic restrictions on the distribution of content.",
        column_type: ColumnType::Json,
        source: Source::Summary,
        extract: |s| Ok(s.summary.config.restrictions.clone()),
    },
    Column {
        name: "viewer_certificate",
        description: "The SSL/TLS configuration used to communicate with viewers.",
        column_type: ColumnType::Json,
        source: Source::Summary,
        extract: |s| Ok(s.summary.config.viewer_certificate.clone()),
    },
    Column {
        name: "active_trusted_key_groups",
        description: "Key groups, with the public key ids in each, that CloudFront can use to verify signed URLs and signed cookies.",
        column_type: ColumnType::Json,
        source: Source::Detail,
        extract: |s| Ok(detail_value(s, |d| d.active_trusted_key_groups.clone())),
    },
    Column {
        name: "active_trusted_signers",
        description: "AWS accounts, with their active CloudFront key pair ids, that CloudFront can use to verify signed URLs and signed cookies.",
        column_type: ColumnType::Json,
        source: Source::Detail,
        extract: |s| Ok(detail_value(s, |d| d.active_trusted_signers.clone())),
    },
    Column {
        name: "price_class",
        description: "The price class of the distribution.",
        column_type: ColumnType::String,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.config.price_class)),
    },
    Column {
        name: "web_acl_id",
        description: "The web ACL id (if any) associated with the distribution.",
        column_type: ColumnType::String,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.config.web_acl_id)),
    },
    Column {
        name: "default_root_object",
        description: "The object CloudFront requests from the origin when a viewer requests the root URL.",
        column_type: ColumnType::String,
        source: Source::Detail,
        extract: |s| Ok(detail_value(s, |d| json!(d.default_root_object()))),
    },
    Column {
        name: "aliases",
        description: "The CNAMEs (alternate domain names) associated with the distribution.",
        column_type: ColumnType::Json,
        source: Source::Summary,
        extract: |s| Ok(s.summary.config.aliases.clone()),
    },
    Column {
        name: "cache_behaviors",
        description: "The cache behaviors of the distribution.",
        column_type: ColumnType::Json,
        source: Source::Summary,
        extract: |s| Ok(s.summary.config.cache_behaviors.clone()),
    },
    Column {
        name: "origins",
        description: "The origins of the distribution.",
        column_type: ColumnType::Json,
        source: Source::Summary,
        extract: |s| Ok(s.summary.config.origins.clone()),
    },
    Column {
        name: "in_progress_invalidation_batches",
        description: "The number of invalidation batches currently in progress.",
        column_type: ColumnType::Int,
        source: Source::Detail,
        extract: |s| Ok(detail_value(s, |d| json!(d.in_progress_invalidation_batches))),
    },
    Column {
        name: "arn",
        description: "The Amazon Resource Name (ARN) of the distribution.",
        column_type: ColumnType::String,
        source: Source::Summary,
        extract: |s| Ok(json!(s.summary.arn)),
    },
    Column {
        name: "tags",
        description: "A map of tags for the resource.",
        column_type: ColumnType::Json,
        source: Source::Derived(Some(Dependency::Tags)),
        extract: |s| Ok(json!(normalize(s.tags)?)),
    },
    Column {
        name: "title",
        description: "Title of the resource.",
        column_type: ColumnType::String,
        source: Source::Derived(None),
        extract: |s| Ok(json!(s.summary.id)),
    },
    Column {
        name: "akas",
        description: "Array of globally unique identifier strings (also known as) for the resource.",
        column_type: ColumnType::Json,
        source: Source::Derived(None),
        extract: |s| Ok(json!(arn_to_akas(&s.summary.arn))),
    },
    Column {
        name: "partition",
        description: "The AWS partition in which the resource is located (aws, aws-cn, or aws-us-gov).",
        column_type: ColumnType::String,
        source: Source::Derived(None),
        extract: |s| Ok(json!(Arn::parse(&s.summary.arn).map(|a| a.partition))),
    },
    Column {
        name: "region",
        description: "The AWS region the session was opened for.",
        column_type: ColumnType::String,
        source: Source::Derived(None),
        extract: |s| Ok(json!(s.region)),
    },
    Column {
        name: "account_id",
        description: "The AWS account ID in which the resource is located.",
        column_type: ColumnType::String,
        source: Source::Derived(None),
        extract: |s| Ok(json!(Arn::parse(&s.summary.arn).map(|a| a.account_id))),
    },
];

/// Get a column by name
pub fn get_column(name: &str) -> Option<&'static Column> {
    COLUMNS.iter().find(|c| c.name == name)
}

/// All column names in declaration order
pub fn column_names() -> Vec<&'static str> {
    COLUMNS.iter().map(|c| c.name).collect()
}
