//! CloudFront distribution core
//!
//! Enumerates distributions and resolves their attributes, making the
//! detail and tag calls only for the columns that need them.
//!
//! # Architecture
//!
//! - [`enumerate`] - Lazy, paginated listing of distribution summaries
//! - [`detail`] - `GetDistribution` with not-found classification
//! - [`tags`] - Tag fetching and normalization
//! - [`columns`] - Static table routing each column to its source
//! - [`resolver`] - Per-item memoized resolution, listing and point lookup
//!
//! # Example
//!
//! ```ignore
//! use cfdist::distribution::{QueryPlan, Resolver};
//! use futures::TryStreamExt;
//!
//! async fn ids(session: &cfdist::aws::session::Session) -> anyhow::Result<Vec<serde_json::Value>> {
//!     let resolver = Resolver::new(session, QueryPlan::new(&["id", "tags"])?);
//!     let records: Vec<_> = resolver.list().try_collect().await?;
//!     Ok(records.into_iter().map(|r| r.into_json()).collect())
//! }
//! ```

pub mod columns;
pub mod detail;
pub mod enumerate;
pub mod model;
pub mod resolver;
pub mod tags;

pub use columns::{column_names, get_column, Column, ColumnType, Dependency, Source, COLUMNS};
pub use detail::fetch_detail;
pub use enumerate::enumerate;
pub use model::{DistributionDetail, DistributionSummary, SummaryConfig};
pub use resolver::{ItemContext, QueryPlan, ResolvedRecord, Resolver, DEFAULT_CONCURRENCY};
pub use tags::{fetch_tags, normalize, Tag, TagSet};
