//! JSON documents from SDK output types
//!
//! The model and the JSON columns work on `serde_json::Value` documents keyed
//! by the CloudFront element names (`Id`, `ARN`, `DistributionConfig`, ...).
//! [`ToJson`] builds those documents from the typed SDK responses.
//!
//! SDK accessors return `&str`/`bool` for required members and `Option<_>`
//! for optional ones; both forms implement [`ToJson`], so the struct tables
//! below only list element names and accessors. Absent members are left out
//! of the object rather than written as `null`.

use aws_sdk_cloudfront::primitives::{DateTime, DateTimeFormat};
use aws_sdk_cloudfront::types::{
    ActiveTrustedKeyGroups, ActiveTrustedSigners, AliasIcpRecordal, Aliases, AllowedMethods, CacheBehavior,
    CacheBehaviors, CachedMethods, CustomErrorResponse, CustomErrorResponses, CustomHeaders, CustomOriginConfig,
    DefaultCacheBehavior, Distribution, DistributionConfig, DistributionList, DistributionSummary, EventType,
    FunctionAssociation, FunctionAssociations, GeoRestriction, GeoRestrictionType, HttpVersion, IcpRecordalStatus,
    KeyPairIds, KgKeyPairIds, LambdaFunctionAssociation, LambdaFunctionAssociations, LoggingConfig, Method,
    MinimumProtocolVersion, Origin, OriginCustomHeader, OriginGroup, OriginGroupFailoverCriteria, OriginGroupMember,
    OriginGroupMembers, OriginGroups, OriginProtocolPolicy, OriginShield, OriginSslProtocols, Origins, PriceClass,
    Restrictions, S3OriginConfig, Signer, SslProtocol, SslSupportMethod, StatusCodes, Tag, Tags, TrustedKeyGroups,
    TrustedSigners, ViewerCertificate, ViewerProtocolPolicy,
};
use serde_json::{Map, Value};

/// Conversion into a CloudFront-shaped JSON document
pub trait ToJson {
    fn to_json(&self) -> Value;
}

impl ToJson for str {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        self.as_str().to_json()
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToJson for i32 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl ToJson for i64 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

/// RFC 3339, e.g. `2024-01-15T10:30:00Z`
impl ToJson for DateTime {
    fn to_json(&self) -> Value {
        self.fmt(DateTimeFormat::DateTime)
            .map(Value::String)
            .unwrap_or(Value::Null)
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(value) => value.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

/// Insert a member unless it is absent
fn insert(map: &mut Map<String, Value>, key: &str, value: Value) {
    if !value.is_null() {
        map.insert(key.to_string(), value);
    }
}

/// Enums render as their wire string
macro_rules! enum_to_json {
    ($($ty:ident),* $(,)?) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> Value {
                    Value::String(self.as_str().to_string())
                }
            }
        )*
    };
}

/// Structures render as objects of their listed members, in order
macro_rules! struct_to_json {
    ($($ty:ident { $($key:literal => $accessor:ident),* $(,)? })*) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> Value {
                    let mut map = Map::new();
                    $(insert(&mut map, $key, self.$accessor().to_json());)*
                    Value::Object(map)
                }
            }
        )*
    };
}

enum_to_json!(
    EventType,
    GeoRestrictionType,
    HttpVersion,
    IcpRecordalStatus,
    Method,
    MinimumProtocolVersion,
    OriginProtocolPolicy,
    PriceClass,
    SslProtocol,
    SslSupportMethod,
    ViewerProtocolPolicy,
);

struct_to_json! {
    DistributionList {
        "Marker" => marker,
        "NextMarker" => next_marker,
        "MaxItems" => max_items,
        "IsTruncated" => is_truncated,
        "Quantity" => quantity,
        "Items" => items,
    }

    DistributionSummary {
        "Id" => id,
        "ARN" => arn,
        "Status" => status,
        "LastModifiedTime" => last_modified_time,
        "DomainName" => domain_name,
        "Aliases" => aliases,
        "Origins" => origins,
        "OriginGroups" => origin_groups,
        "DefaultCacheBehavior" => default_cache_behavior,
        "CacheBehaviors" => cache_behaviors,
        "CustomErrorResponses" => custom_error_responses,
        "Comment" => comment,
        "PriceClass" => price_class,
        "Enabled" => enabled,
        "ViewerCertificate" => viewer_certificate,
        "Restrictions" => restrictions,
        "WebACLId" => web_acl_id,
        "HttpVersion" => http_version,
        "IsIPV6Enabled" => is_ipv6_enabled,
        "AliasICPRecordals" => alias_icp_recordals,
        "Staging" => staging,
    }

    Distribution {
        "Id" => id,
        "ARN" => arn,
        "Status" => status,
        "LastModifiedTime" => last_modified_time,
        "InProgressInvalidationBatches" => in_progress_invalidation_batches,
        "DomainName" => domain_name,
        "ActiveTrustedSigners" => active_trusted_signers,
        "ActiveTrustedKeyGroups" => active_trusted_key_groups,
        "DistributionConfig" => distribution_config,
        "AliasICPRecordals" => alias_icp_recordals,
    }

    DistributionConfig {
        "CallerReference" => caller_reference,
        "Aliases" => aliases,
        "DefaultRootObject" => default_root_object,
        "Origins" => origins,
        "OriginGroups" => origin_groups,
        "DefaultCacheBehavior" => default_cache_behavior,
        "CacheBehaviors" => cache_behaviors,
        "CustomErrorResponses" => custom_error_responses,
        "Comment" => comment,
        "Logging" => logging,
        "PriceClass" => price_class,
        "Enabled" => enabled,
        "ViewerCertificate" => viewer_certificate,
        "Restrictions" => restrictions,
        "WebACLId" => web_acl_id,
        "HttpVersion" => http_version,
        "IsIPV6Enabled" => is_ipv6_enabled,
        "ContinuousDeploymentPolicyId" => continuous_deployment_policy_id,
        "Staging" => staging,
    }

    Aliases { "Quantity" => quantity, "Items" => items }

    AliasIcpRecordal { "CNAME" => cname, "ICPRecordalStatus" => icp_recordal_status }

    Origins { "Quantity" => quantity, "Items" => items }

    Origin {
        "Id" => id,
        "DomainName" => domain_name,
        "OriginPath" => origin_path,
        "CustomHeaders" => custom_headers,
        "S3OriginConfig" => s3_origin_config,
        "CustomOriginConfig" => custom_origin_config,
        "ConnectionAttempts" => connection_attempts,
        "ConnectionTimeout" => connection_timeout,
        "OriginShield" => origin_shield,
        "OriginAccessControlId" => origin_access_control_id,
    }

    CustomHeaders { "Quantity" => quantity, "Items" => items }

    OriginCustomHeader { "HeaderName" => header_name, "HeaderValue" => header_value }

    S3OriginConfig { "OriginAccessIdentity" => origin_access_identity }

    CustomOriginConfig {
        "HTTPPort" => http_port,
        "HTTPSPort" => https_port,
        "OriginProtocolPolicy" => origin_protocol_policy,
        "OriginSslProtocols" => origin_ssl_protocols,
        "OriginReadTimeout" => origin_read_timeout,
        "OriginKeepaliveTimeout" => origin_keepalive_timeout,
    }

    OriginSslProtocols { "Quantity" => quantity, "Items" => items }

    OriginShield { "Enabled" => enabled, "OriginShieldRegion" => origin_shield_region }

    OriginGroups { "Quantity" => quantity, "Items" => items }

    OriginGroup { "Id" => id, "FailoverCriteria" => failover_criteria, "Members" => members }

    OriginGroupFailoverCriteria { "StatusCodes" => status_codes }

    StatusCodes { "Quantity" => quantity, "Items" => items }

    OriginGroupMembers { "Quantity" => quantity, "Items" => items }

    OriginGroupMember { "OriginId" => origin_id }

    DefaultCacheBehavior {
        "TargetOriginId" => target_origin_id,
        "TrustedSigners" => trusted_signers,
        "TrustedKeyGroups" => trusted_key_groups,
        "ViewerProtocolPolicy" => viewer_protocol_policy,
        "AllowedMethods" => allowed_methods,
        "SmoothStreaming" => smooth_streaming,
        "Compress" => compress,
        "LambdaFunctionAssociations" => lambda_function_associations,
        "FunctionAssociations" => function_associations,
        "FieldLevelEncryptionId" => field_level_encryption_id,
        "RealtimeLogConfigArn" => realtime_log_config_arn,
        "CachePolicyId" => cache_policy_id,
        "OriginRequestPolicyId" => origin_request_policy_id,
        "ResponseHeadersPolicyId" => response_headers_policy_id,
    }

    CacheBehaviors { "Quantity" => quantity, "Items" => items }

    CacheBehavior {
        "PathPattern" => path_pattern,
        "TargetOriginId" => target_origin_id,
        "TrustedSigners" => trusted_signers,
        "TrustedKeyGroups" => trusted_key_groups,
        "ViewerProtocolPolicy" => viewer_protocol_policy,
        "AllowedMethods" => allowed_methods,
        "SmoothStreaming" => smooth_streaming,
        "Compress" => compress,
        "LambdaFunctionAssociations" => lambda_function_associations,
        "FunctionAssociations" => function_associations,
        "FieldLevelEncryptionId" => field_level_encryption_id,
        "RealtimeLogConfigArn" => realtime_log_config_arn,
        "CachePolicyId" => cache_policy_id,
        "OriginRequestPolicyId" => origin_request_policy_id,
        "ResponseHeadersPolicyId" => response_headers_policy_id,
    }

    TrustedSigners { "Enabled" => enabled, "Quantity" => quantity, "Items" => items }

    TrustedKeyGroups { "Enabled" => enabled, "Quantity" => quantity, "Items" => items }

    AllowedMethods { "Quantity" => quantity, "Items" => items, "CachedMethods" => cached_methods }

    CachedMethods { "Quantity" => quantity, "Items" => items }

    LambdaFunctionAssociations { "Quantity" => quantity, "Items" => items }

    LambdaFunctionAssociation {
        "LambdaFunctionARN" => lambda_function_arn,
        "EventType" => event_type,
        "IncludeBody" => include_body,
    }

    FunctionAssociations { "Quantity" => quantity, "Items" => items }

    FunctionAssociation { "FunctionARN" => function_arn, "EventType" => event_type }

    CustomErrorResponses { "Quantity" => quantity, "Items" => items }

    CustomErrorResponse {
        "ErrorCode" => error_code,
        "ResponsePagePath" => response_page_path,
        "ResponseCode" => response_code,
        "ErrorCachingMinTTL" => error_caching_min_ttl,
    }

    LoggingConfig {
        "Enabled" => enabled,
        "IncludeCookies" => include_cookies,
        "Bucket" => bucket,
        "Prefix" => prefix,
    }

    ViewerCertificate {
        "CloudFrontDefaultCertificate" => cloud_front_default_certificate,
        "IAMCertificateId" => iam_certificate_id,
        "ACMCertificateArn" => acm_certificate_arn,
        "SSLSupportMethod" => ssl_support_method,
        "MinimumProtocolVersion" => minimum_protocol_version,
    }

    Restrictions { "GeoRestriction" => geo_restriction }

    GeoRestriction { "RestrictionType" => restriction_type, "Quantity" => quantity, "Items" => items }

    ActiveTrustedSigners { "Enabled" => enabled, "Quantity" => quantity, "Items" => items }

    Signer { "AwsAccountNumber" => aws_account_number, "KeyPairIds" => key_pair_ids }

    ActiveTrustedKeyGroups { "Enabled" => enabled, "Quantity" => quantity, "Items" => items }

    KgKeyPairIds { "KeyGroupId" => key_group_id, "KeyPairIds" => key_pair_ids }

    KeyPairIds { "Quantity" => quantity, "Items" => items }

    Tags { "Items" => items }

    Tag { "Key" => key, "Value" => value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strings_are_never_reinterpreted() {
        assert_eq!("true".to_json(), json!("true"));
        assert_eq!("false".to_json(), json!("false"));
        assert_eq!("42".to_json(), json!("42"));
        assert_eq!(" Jane Doe ".to_json(), json!(" Jane Doe "));
        assert_eq!("   ".to_json(), json!("   "));
    }

    #[test]
    fn test_optional_members() {
        assert_eq!(Some("x").to_json(), json!("x"));
        assert_eq!(None::<&str>.to_json(), Value::Null);
        assert_eq!(Some(7i64).to_json(), json!(7));

        let mut map = Map::new();
        insert(&mut map, "Absent", None::<bool>.to_json());
        insert(&mut map, "Enabled", false.to_json());
        assert_eq!(Value::Object(map), json!({"Enabled": false}));
    }

    #[test]
    fn test_lists() {
        let items = vec!["a.example.com".to_string(), "b.example.com".to_string()];
        assert_eq!(items.to_json(), json!(["a.example.com", "b.example.com"]));
        assert_eq!(Some(&[200, 404][..]).to_json(), json!([200, 404]));
        assert_eq!(Vec::<String>::new().to_json(), json!([]));
    }

    #[test]
    fn test_timestamps_render_as_rfc3339() {
        let time = DateTime::from_secs(1_705_314_600);
        assert_eq!(time.to_json(), json!("2024-01-15T10:30:00Z"));
    }

    #[test]
    fn test_enums_render_wire_strings() {
        assert_eq!(PriceClass::PriceClass100.to_json(), json!("PriceClass_100"));
        assert_eq!(HttpVersion::from("http2and3").to_json(), json!("http2and3"));
        assert_eq!(Method::Get.to_json(), json!("GET"));
    }
}
