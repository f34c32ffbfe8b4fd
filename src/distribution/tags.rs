//! Tag fetching and normalization

use crate::aws::session::Session;
use crate::error::FetchError;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// One provider tag; the API allows a missing value on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: Option<String>,
}

impl Tag {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: Some(value.to_string()),
        }
    }
}

/// Ordered tag list of one resource
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self { tags }
    }

    /// Decode a `<Tags>` document; a missing `Items` list means no tags
    pub fn from_value(doc: &Value) -> Result<Self, FetchError> {
        let items = match doc.get("Items") {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(FetchError::malformed(format!(
                    "tag list is not a list: {}",
                    other
                )))
            }
        };

        let tags = items
            .iter()
            .map(|item| {
                let key = item
                    .get("Key")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| FetchError::malformed("tag entry is missing Key"))?;
                let value = item.get("Value").and_then(Value::as_str).map(str::to_string);
                Ok(Tag { key, value })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;

        Ok(Self { tags })
    }

    /// Inverse of [`normalize`] for well-formed mappings
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            tags: map.iter().map(|(k, v)| Tag::new(k, v)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// List-of-pairs view in the provider's shape: `[{"Key": .., "Value": ..}]`
    pub fn to_pairs(&self) -> Value {
        Value::Array(
            self.tags
                .iter()
                .map(|tag| json!({"Key": tag.key, "Value": tag.value}))
                .collect(),
        )
    }
}

/// Fetch the tags of a resource by ARN
pub async fn fetch_tags(session: &Session, arn: &str) -> Result<TagSet, FetchError> {
    tracing::trace!("fetch_tags {}", arn);

    let doc = session.api().list_tags_for_resource(arn).await?;
    TagSet::from_value(&doc)
}

/// Canonical tag mapping
///
/// `None` (tags not fetched) stays `None`; a fetched but empty set becomes an
/// empty map. Duplicate keys keep the last value. An entry without a value
/// is a malformed response.
pub fn normalize(tags: Option<&TagSet>) -> Result<Option<BTreeMap<String, String>>, FetchError> {
    let Some(tags) = tags else {
        return Ok(None);
    };

    let mut map = BTreeMap::new();
    for tag in tags.iter() {
        let value = tag
            .value
            .as_ref()
            .ok_or_else(|| FetchError::malformed(format!("tag '{}' has no value", tag.key)))?;
        map.insert(tag.key.clone(), value.clone());
    }
    Ok(Some(map))
}
