//! Distribution enumerator
//!
//! Drives the paginated listing call and yields one summary per item.

use super::model::DistributionSummary;
use crate::aws::session::Session;
use crate::error::FetchError;
use futures::stream::{self, Stream, TryStreamExt};
use serde_json::Value;

/// Pagination state between listing calls
enum Page {
    Next(Option<String>),
    Done,
}

/// Split one `<DistributionList>` page into its summaries and the next marker
fn parse_page(page: &Value) -> Result<(Vec<DistributionSummary>, Option<String>), FetchError> {
    let items = match page.get("Items") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(DistributionSummary::from_value)
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(FetchError::malformed("distribution list Items is not a list")),
    };

    let truncated = page
        .get("IsTruncated")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if !truncated {
        return Ok((items, None));
    }

    let next_marker = page
        .get("NextMarker")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FetchError::malformed("truncated distribution list has no NextMarker"))?;

    Ok((items, Some(next_marker.to_string())))
}

async fn fetch_page(
    session: &Session,
    page: Page,
) -> Result<Option<(Vec<DistributionSummary>, Page)>, FetchError> {
    let marker = match page {
        Page::Done => return Ok(None),
        Page::Next(marker) => marker,
    };

    tracing::trace!("list_distributions marker={:?}", marker);
    let document = session.api().list_distributions(marker.as_deref()).await?;
    let (items, next_marker) = parse_page(&document)?;
    tracing::debug!("Listed {} distributions", items.len());

    let next = match next_marker {
        Some(marker) => Page::Next(Some(marker)),
        None => Page::Done,
    };
    Ok(Some((items, next)))
}

/// Lazily enumerate every distribution in provider order
///
/// Pages are requested only as the stream is polled. The first error is
/// yielded and ends the stream; items already yielded stand.
pub fn enumerate(
    session: &Session,
) -> impl Stream<Item = Result<DistributionSummary, FetchError>> + Send + '_ {
    stream::try_unfold(Page::Next(None), move |page| fetch_page(session, page))
        .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
        .try_flatten()
}
