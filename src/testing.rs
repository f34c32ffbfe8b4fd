//! In-memory `DistributionApi` for unit tests

use crate::aws::session::{DistributionApi, DistributionResponse, Session};
use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ACCOUNT: &str = "123456789012";

pub fn arn(id: &str) -> String {
    format!("arn:aws:cloudfront::{}:distribution/{}", ACCOUNT, id)
}

/// A `<DistributionSummary>` as decoded from the listing call
pub fn summary_json(id: &str, enabled: bool) -> Value {
    json!({
        "Id": id,
        "ARN": arn(id),
        "Status": "Deployed",
        "LastModifiedTime": "2024-01-15T10:30:00Z",
        "DomainName": format!("{}.cloudfront.net", id.to_lowercase()),
        "Aliases": {"Quantity": 0},
        "Origins": {"Quantity": 1, "Items": [{"Id": "origin-1", "DomainName": "bucket.s3.amazonaws.com"}]},
        "DefaultCacheBehavior": {"TargetOriginId": "origin-1", "ViewerProtocolPolicy": "redirect-to-https"},
        "CacheBehaviors": {"Quantity": 0},
        "CustomErrorResponses": {"Quantity": 0},
        "Comment": "from listing",
        "PriceClass": "PriceClass_100",
        "Enabled": enabled,
        "ViewerCertificate": {"CloudFrontDefaultCertificate": true},
        "Restrictions": {"GeoRestriction": {"RestrictionType": "none", "Quantity": 0}},
        "WebACLId": "",
        "HttpVersion": "http2",
        "IsIPV6Enabled": true,
        "Staging": false
    })
}

/// A `<Distribution>` as decoded from the detail call
pub fn distribution_json(id: &str, enabled: bool) -> Value {
    json!({
        "Id": id,
        "ARN": arn(id),
        "Status": "Deployed",
        "LastModifiedTime": "2024-01-15T10:30:00Z",
        "InProgressInvalidationBatches": 2,
        "DomainName": format!("{}.cloudfront.net", id.to_lowercase()),
        "ActiveTrustedSigners": {"Enabled": false, "Quantity": 0},
        "ActiveTrustedKeyGroups": {"Enabled": true, "Quantity": 1, "Items": [{"KeyGroupId": "kg-1"}]},
        "DistributionConfig": {
            "CallerReference": "ref-1",
            "Aliases": {"Quantity": 1, "Items": ["cdn.example.com"]},
            "DefaultRootObject": "index.html",
            "Origins": {"Quantity": 1, "Items": [{"Id": "origin-1", "DomainName": "bucket.s3.amazonaws.com"}]},
            "DefaultCacheBehavior": {"TargetOriginId": "origin-1", "ViewerProtocolPolicy": "https-only"},
            "CacheBehaviors": {"Quantity": 0},
            "CustomErrorResponses": {"Quantity": 0},
            "Comment": "from detail",
            "Logging": {"Enabled": false},
            "PriceClass": "PriceClass_All",
            "Enabled": enabled,
            "ViewerCertificate": {"CloudFrontDefaultCertificate": true},
            "Restrictions": {"GeoRestriction": {"RestrictionType": "none", "Quantity": 0}},
            "WebACLId": "acl-1",
            "HttpVersion": "http2and3",
            "IsIPV6Enabled": false
        }
    })
}

#[derive(Default)]
struct FakeState {
    pages: Vec<Vec<Value>>,
    failing_page: Option<usize>,
    distributions: HashMap<String, Value>,
    tags: HashMap<String, Value>,
    detail_delays: HashMap<String, Duration>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    tag_calls: AtomicUsize,
    detail_ids: Mutex<Vec<String>>,
}

/// Scripted provider that counts every call
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state_mut(&mut self) -> &mut FakeState {
        Arc::get_mut(&mut self.state).expect("configure FakeApi before sharing it")
    }

    /// Append one listing page
    pub fn with_page(mut self, items: Vec<Value>) -> Self {
        self.state_mut().pages.push(items);
        self
    }

    /// Make the listing call for page `index` fail with a 500
    pub fn with_failing_page(mut self, index: usize) -> Self {
        self.state_mut().failing_page = Some(index);
        self
    }

    pub fn with_distribution(mut self, distribution: Value) -> Self {
        let id = distribution["Id"].as_str().unwrap_or_default().to_string();
        self.state_mut().distributions.insert(id, distribution);
        self
    }

    pub fn with_tags(mut self, arn: &str, tags: &[(&str, &str)]) -> Self {
        let items: Vec<Value> = tags.iter().map(|(k, v)| json!({"Key": k, "Value": v})).collect();
        self.state_mut().tags.insert(arn.to_string(), json!({"Items": items}));
        self
    }

    pub fn with_raw_tags(mut self, arn: &str, doc: Value) -> Self {
        self.state_mut().tags.insert(arn.to_string(), doc);
        self
    }

    /// Delay the detail call of one distribution
    pub fn with_detail_delay(mut self, id: &str, delay: Duration) -> Self {
        self.state_mut().detail_delays.insert(id.to_string(), delay);
        self
    }

    pub fn session(&self) -> Session {
        Session::with_api(Arc::new(self.clone()), "us-east-1")
    }

    pub fn list_calls(&self) -> usize {
        self.state.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.state.detail_calls.load(Ordering::SeqCst)
    }

    pub fn tag_calls(&self) -> usize {
        self.state.tag_calls.load(Ordering::SeqCst)
    }

    pub fn detail_ids(&self) -> Vec<String> {
        self.state.detail_ids.lock().unwrap().clone()
    }
}

fn page_marker(index: usize) -> String {
    format!("page-{}", index)
}

#[async_trait]
impl DistributionApi for FakeApi {
    async fn list_distributions(&self, marker: Option<&str>) -> Result<Value, TransportError> {
        self.state.list_calls.fetch_add(1, Ordering::SeqCst);

        let index = match marker {
            None => 0,
            Some(marker) => marker
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| TransportError::Status {
                    status: 400,
                    code: "InvalidArgument".to_string(),
                    message: format!("bad marker {}", marker),
                })?,
        };

        if self.state.failing_page == Some(index) {
            return Err(TransportError::Status {
                status: 500,
                code: "InternalError".to_string(),
                message: "listing failed".to_string(),
            });
        }

        let items = self.state.pages.get(index).cloned().unwrap_or_default();
        let truncated = index + 1 < self.state.pages.len();
        let mut page = json!({
            "Marker": marker.unwrap_or_default(),
            "MaxItems": 100,
            "IsTruncated": truncated,
            "Quantity": items.len(),
            "Items": items,
        });
        if truncated {
            page["NextMarker"] = json!(page_marker(index + 1));
        }
        Ok(page)
    }

    async fn get_distribution(&self, id: &str) -> Result<DistributionResponse, TransportError> {
        self.state.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.state.detail_ids.lock().unwrap().push(id.to_string());

        if let Some(delay) = self.state.detail_delays.get(id) {
            tokio::time::sleep(*delay).await;
        }

        match self.state.distributions.get(id) {
            Some(distribution) => Ok(DistributionResponse {
                distribution: distribution.clone(),
                etag: Some(format!("E{}ETAG", id)),
            }),
            None => Err(TransportError::Status {
                status: 404,
                code: "NoSuchDistribution".to_string(),
                message: "The specified distribution does not exist.".to_string(),
            }),
        }
    }

    async fn list_tags_for_resource(&self, arn: &str) -> Result<Value, TransportError> {
        self.state.tag_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state
            .tags
            .get(arn)
            .cloned()
            .unwrap_or_else(|| json!({"Items": []})))
    }
}
