//! Detail fetcher

use super::model::{DistributionDetail, DistributionSummary};
use crate::aws::session::{DistributionResponse, Session};
use crate::error::{FetchError, TransportError};
use serde_json::Value;

/// Provider error code for an unknown distribution id
const NO_SUCH_DISTRIBUTION: &str = "NoSuchDistribution";

fn classify(id: &str, err: TransportError) -> FetchError {
    if err.code() == Some(NO_SUCH_DISTRIBUTION) || err.status() == Some(404) {
        FetchError::NotFound(id.to_string())
    } else {
        FetchError::Transport(err)
    }
}

/// Merge a `GetDistribution` response into a detail record
///
/// The summary-shaped view takes identity fields from the distribution and
/// configuration fields from its `DistributionConfig`.
pub fn detail_from_response(response: DistributionResponse) -> Result<DistributionDetail, FetchError> {
    let distribution = response.distribution;
    let config = distribution
        .get("DistributionConfig")
        .filter(|c| c.is_object())
        .cloned()
        .ok_or_else(|| FetchError::malformed("distribution is missing DistributionConfig"))?;

    let summary = DistributionSummary::from_parts(&distribution, &config)?;

    Ok(DistributionDetail {
        summary,
        active_trusted_key_groups: distribution
            .get("ActiveTrustedKeyGroups")
            .cloned()
            .unwrap_or(Value::Null),
        active_trusted_signers: distribution
            .get("ActiveTrustedSigners")
            .cloned()
            .unwrap_or(Value::Null),
        in_progress_invalidation_batches: distribution
            .get("InProgressInvalidationBatches")
            .and_then(|v| v.as_i64())
            .unwrap_or(0),
        config,
        etag: response.etag,
    })
}

/// Fetch the full view of one distribution
///
/// An unknown id is [`FetchError::NotFound`]; every other failure is
/// returned as is.
pub async fn fetch_detail(session: &Session, id: &str) -> Result<DistributionDetail, FetchError> {
    tracing::trace!("fetch_detail {}", id);

    let response = session
        .api()
        .get_distribution(id)
        .await
        .map_err(|err| classify(id, err))?;

    detail_from_response(response)
}
