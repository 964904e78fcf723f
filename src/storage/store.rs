//! Document store boundary
//!
//! The store is an external collaborator. The core only consumes two push-based
//! operations: watch one document by reference, and watch a query over a
//! collection. Both return a [`SubscriptionHandle`] that stops delivery when
//! cancelled.

use crate::core::subscription::SubscriptionHandle;
use crate::utils::error::RemoteError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Raw document payload as delivered by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier
    pub id: String,
    /// Field data
    pub fields: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Reference to a single document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub collection: String,
    pub id: String,
}

impl DocumentRef {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Equality filter on a top-level field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

/// Query over a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionQuery {
    pub collection: String,
    #[serde(default)]
    pub filters: Vec<FieldFilter>,
    /// Field to order by; results are ordered by identifier when absent
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl CollectionQuery {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a document's fields satisfy every filter
    pub fn matches(&self, fields: &Value) -> bool {
        self.filters
            .iter()
            .all(|filter| fields.get(&filter.field) == Some(&filter.value))
    }

    /// Order and truncate a result set the way the query asks
    pub fn arrange(&self, documents: &mut Vec<Document>) {
        documents.sort_by(|a, b| {
            let by_field = match &self.order_by {
                Some(field) => compare_values(a.fields.get(field), b.fields.get(field)),
                None => Ordering::Equal,
            };
            by_field.then_with(|| a.id.cmp(&b.id))
        });
        if let Some(limit) = self.limit {
            documents.truncate(limit);
        }
    }
}

impl std::fmt::Display for CollectionQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.collection)?;
        for filter in &self.filters {
            write!(f, " [{} == {}]", filter.field, filter.value)?;
        }
        if let Some(field) = &self.order_by {
            write!(f, " order by {}", field)?;
        }
        Ok(())
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

/// Callback receiving single-document snapshots
pub type DocumentListener = Box<dyn Fn(Result<Option<Document>, RemoteError>) + Send + Sync>;

/// Callback receiving collection snapshots
pub type QueryListener = Box<dyn Fn(Result<Vec<Document>, RemoteError>) + Send + Sync>;

/// Push-based document store.
///
/// Listeners may be invoked synchronously from inside the watch call. After the
/// returned handle is cancelled the store should stop invoking the listener, but
/// bindings tolerate stores that deliver late.
pub trait DocumentStore: Send + Sync {
    /// Watch one document; `None` is delivered when it does not exist
    fn watch_document(
        &self,
        reference: &DocumentRef,
        listener: DocumentListener,
    ) -> SubscriptionHandle;

    /// Watch every document matching a query
    fn watch_query(&self, query: &CollectionQuery, listener: QueryListener) -> SubscriptionHandle;
}
