//! Document store sources

use super::binding::{Binding, EventSink, LiveSource};
use super::handle::SubscriptionHandle;
use crate::core::models::Entity;
use crate::storage::{CollectionQuery, DocumentRef, DocumentStore};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

/// Binding over one document
pub type DocumentBinding<T> = Binding<DocumentSource<T>>;

/// Binding over a collection query
pub type QueryBinding<T> = Binding<QuerySource<T>>;

/// Single document decoded as `T`; `None` when the document does not exist
pub struct DocumentSource<T> {
    store: Arc<dyn DocumentStore>,
    reference: DocumentRef,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DocumentSource<T> {
    pub fn new(store: Arc<dyn DocumentStore>, reference: DocumentRef) -> Self {
        Self {
            store,
            reference,
            _marker: PhantomData,
        }
    }

    pub fn reference(&self) -> &DocumentRef {
        &self.reference
    }
}

impl<T> LiveSource for DocumentSource<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Value = Option<Entity<T>>;

    fn describe(&self) -> String {
        format!("document {}", self.reference)
    }

    fn open(&self, sink: EventSink<Self::Value>) -> SubscriptionHandle {
        self.store.watch_document(
            &self.reference,
            Box::new(move |event| {
                sink.emit(event.and_then(|snapshot| snapshot.map(Entity::decode).transpose()));
            }),
        )
    }
}

impl<T> Binding<DocumentSource<T>>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// The resolved entity, or `None` while loading or when it does not exist
    pub fn entity(&self) -> Option<Entity<T>> {
        self.data().flatten()
    }
}

/// Every document matching a query, decoded as `T`, in the store's order
pub struct QuerySource<T> {
    store: Arc<dyn DocumentStore>,
    query: CollectionQuery,
    _marker: PhantomData<fn() -> T>,
}

impl<T> QuerySource<T> {
    pub fn new(store: Arc<dyn DocumentStore>, query: CollectionQuery) -> Self {
        Self {
            store,
            query,
            _marker: PhantomData,
        }
    }

    pub fn query(&self) -> &CollectionQuery {
        &self.query
    }
}

impl<T> LiveSource for QuerySource<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Value = Vec<Entity<T>>;

    fn describe(&self) -> String {
        format!("query {}", self.query)
    }

    fn open(&self, sink: EventSink<Self::Value>) -> SubscriptionHandle {
        self.store.watch_query(
            &self.query,
            Box::new(move |event| {
                sink.emit(event.and_then(Entity::decode_all));
            }),
        )
    }
}
