//! Attribute resolver
//!
//! Turns summaries (or a single id) into [`ResolvedRecord`]s. Each item gets
//! its own [`ItemContext`], which makes the detail and tag calls at most once
//! and only when a requested column depends on them.

use super::columns::{get_column, Column, Dependency, Sources, COLUMNS};
use super::detail::fetch_detail;
use super::enumerate::enumerate;
use super::model::{DistributionDetail, DistributionSummary};
use super::tags::{fetch_tags, TagSet};
use crate::aws::session::Session;
use crate::error::FetchError;
use futures::future;
use futures::stream::{Stream, StreamExt};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use tokio::sync::OnceCell;

/// Items enriched concurrently while listing
pub const DEFAULT_CONCURRENCY: usize = 8;

/// The validated set of columns for one request
#[derive(Debug, Clone)]
pub struct QueryPlan {
    columns: Vec<&'static Column>,
    needs_detail: bool,
    needs_tags: bool,
}

impl QueryPlan {
    /// Build a plan from column names; an empty list selects every column
    ///
    /// Unknown names are rejected. Repeated names are kept once, at their
    /// first position.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, FetchError> {
        if names.is_empty() {
            return Ok(Self::all());
        }

        let mut columns: Vec<&'static Column> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref().trim();
            let column = get_column(name).ok_or_else(|| FetchError::UnknownColumn(name.to_string()))?;
            if !columns.iter().any(|c| c.name == column.name) {
                columns.push(column);
            }
        }
        Ok(Self::from_columns(columns))
    }

    pub fn all() -> Self {
        Self::from_columns(COLUMNS.iter().collect())
    }

    fn from_columns(columns: Vec<&'static Column>) -> Self {
        let depends_on = |dep| columns.iter().any(|c| c.source.dependency() == Some(dep));
        let needs_detail = depends_on(Dependency::Detail);
        let needs_tags = depends_on(Dependency::Tags);
        Self {
            columns,
            needs_detail,
            needs_tags,
        }
    }

    pub fn needs_detail(&self) -> bool {
        self.needs_detail
    }

    pub fn needs_tags(&self) -> bool {
        self.needs_tags
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static Column> + '_ {
        self.columns.iter().copied()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}

/// One output row: the requested columns in plan order
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord {
    fields: Vec<(&'static str, Value)>,
}

impl ResolvedRecord {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to a JSON object (keys lose their column order)
    pub fn into_json(self) -> Value {
        Value::Object(
            self.fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

impl Serialize for ResolvedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Resolution state of a single item
///
/// Holds the summary plus the memoized detail and tags. Never shared
/// between items.
pub struct ItemContext<'a> {
    session: &'a Session,
    summary: DistributionSummary,
    detail: OnceCell<DistributionDetail>,
    tags: OnceCell<TagSet>,
}

impl<'a> ItemContext<'a> {
    /// Context for an item produced by the enumerator
    pub fn from_summary(session: &'a Session, summary: DistributionSummary) -> Self {
        Self {
            session,
            summary,
            detail: OnceCell::new(),
            tags: OnceCell::new(),
        }
    }

    /// Context for a point lookup
    ///
    /// Fetches the detail up front and takes the summary from it. Returns
    /// `None` when the distribution does not exist.
    pub async fn lookup(session: &'a Session, id: &str) -> Result<Option<Self>, FetchError> {
        if id.is_empty() {
            return Ok(None);
        }

        let detail = match fetch_detail(session, id).await {
            Ok(detail) => detail,
            Err(err) if err.is_not_found() => {
                tracing::debug!("Distribution {} not found", id);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        Ok(Some(Self {
            session,
            summary: detail.summary.clone(),
            detail: OnceCell::new_with(Some(detail)),
            tags: OnceCell::new(),
        }))
    }

    pub fn summary(&self) -> &DistributionSummary {
        &self.summary
    }

    /// Detail of this item, fetched on first use
    pub async fn detail(&self) -> Result<&DistributionDetail, FetchError> {
        self.detail
            .get_or_try_init(|| fetch_detail(self.session, &self.summary.id))
            .await
    }

    /// Tags of this item, fetched on first use
    pub async fn tags(&self) -> Result<&TagSet, FetchError> {
        self.tags
            .get_or_try_init(|| fetch_tags(self.session, &self.summary.arn))
            .await
    }

    /// The summary with detail configuration applied, if detail was fetched
    pub fn merged_summary(&self) -> Cow<'_, DistributionSummary> {
        match self.detail.get() {
            Some(detail) => Cow::Owned(DistributionSummary {
                config: detail.summary.config.clone(),
                ..self.summary.clone()
            }),
            None => Cow::Borrowed(&self.summary),
        }
    }

    async fn ensure(&self, dependency: Option<Dependency>) -> Result<(), FetchError> {
        match dependency {
            Some(Dependency::Detail) => self.detail().await.map(|_| ()),
            Some(Dependency::Tags) => self.tags().await.map(|_| ()),
            None => Ok(()),
        }
    }

    fn extract(&self, column: &Column, summary: &DistributionSummary) -> Result<Value, FetchError> {
        let sources = Sources {
            summary,
            detail: self.detail.get(),
            tags: self.tags.get(),
            region: self.session.region(),
        };
        (column.extract)(&sources)
    }

    /// Value of a single column, fetching what it depends on
    pub async fn attribute(&self, name: &str) -> Result<Value, FetchError> {
        let column = get_column(name).ok_or_else(|| FetchError::UnknownColumn(name.to_string()))?;
        self.ensure(column.source.dependency()).await?;
        self.extract(column, &self.merged_summary())
    }

    /// Resolve every column of the plan
    ///
    /// Both calls the plan needs run concurrently and complete before any
    /// column is extracted.
    pub async fn resolve(&self, plan: &QueryPlan) -> Result<ResolvedRecord, FetchError> {
        match (plan.needs_detail(), plan.needs_tags()) {
            (true, true) => {
                tokio::try_join!(self.detail(), self.tags())?;
            }
            (true, false) => {
                self.detail().await?;
            }
            (false, true) => {
                self.tags().await?;
            }
            (false, false) => {}
        }

        let summary = self.merged_summary();
        let fields = plan
            .columns()
            .map(|column| Ok((column.name, self.extract(column, &summary)?)))
            .collect::<Result<Vec<_>, FetchError>>()?;

        Ok(ResolvedRecord { fields })
    }
}

/// Listing and point lookup over one session
pub struct Resolver<'a> {
    session: &'a Session,
    plan: QueryPlan,
    concurrency: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(session: &'a Session, plan: QueryPlan) -> Self {
        Self {
            session,
            plan,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set how many items enrich at once; `1` resolves strictly in sequence
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn plan(&self) -> &QueryPlan {
        &self.plan
    }

    /// Resolve every distribution, in enumeration order
    ///
    /// The stream ends after the first error. Dropping it cancels any
    /// in-flight calls.
    pub fn list(&self) -> impl Stream<Item = Result<ResolvedRecord, FetchError>> + Send + '_ {
        enumerate(self.session)
            .map(move |item| async move {
                let context = ItemContext::from_summary(self.session, item?);
                context.resolve(&self.plan).await
            })
            .buffered(self.concurrency)
            .scan(false, |failed, result| {
                if *failed {
                    return future::ready(None);
                }
                *failed = result.is_err();
                future::ready(Some(result))
            })
    }

    /// Resolve a single distribution by id; `None` when it does not exist
    pub async fn get(&self, id: &str) -> Result<Option<ResolvedRecord>, FetchError> {
        match ItemContext::lookup(self.session, id).await? {
            Some(context) => context.resolve(&self.plan).await.map(Some),
            None => Ok(None),
        }
    }
}
