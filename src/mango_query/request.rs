use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Mango find request against one bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangoQuery {
    /// Absent deserializes to empty, which statement generation rejects
    #[serde(default)]
    pub bucket_name: String,
    /// Raw selector; absent or `null` selects every document
    #[serde(default)]
    pub selector: Value,
    /// Projection; empty means `meta().id as _id, <bucket>.*`
    #[serde(default)]
    pub fields: Vec<String>,
    /// Accepted for API compatibility, never compiled
    #[serde(default)]
    pub sort: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl MangoQuery {
    pub fn new(bucket_name: impl Into<String>, selector: Value) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            selector,
            ..Default::default()
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Limit to render; zero counts as no limit
    pub fn effective_limit(&self) -> Option<u64> {
        self.limit.filter(|limit| *limit > 0)
    }
}

/// Ordered list of (possibly dotted) fields to index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    #[serde(default)]
    pub fields: Vec<String>,
}

/// A fully specified secondary index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSpec {
    #[serde(default)]
    pub bucket_name: String,
    pub index: IndexDefinition,
}

/// Input of index statement generation: either an explicit field list or a
/// selector to derive the fields from. The selector wins when both are given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRequest {
    #[serde(default)]
    pub bucket_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Value>,
}

impl IndexRequest {
    pub fn from_selector(bucket_name: impl Into<String>, selector: Value) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            index: None,
            selector: Some(selector),
        }
    }
}

impl From<IndexSpec> for IndexRequest {
    fn from(spec: IndexSpec) -> Self {
        Self {
            bucket_name: spec.bucket_name,
            index: Some(spec.index),
            selector: None,
        }
    }
}
