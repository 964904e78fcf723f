//! In-process document store
//!
//! Keeps collections in memory and pushes snapshots to watchers synchronously on
//! every write. Used by the demo binary and by tests in place of a hosted
//! backend.

use super::store::{
    CollectionQuery, Document, DocumentListener, DocumentRef, DocumentStore, QueryListener,
};
use crate::core::subscription::SubscriptionHandle;
use crate::utils::error::{RemoteError, Result};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::debug;

type DocFn = dyn Fn(std::result::Result<Option<Document>, RemoteError>) + Send + Sync;
type QueryFn = dyn Fn(std::result::Result<Vec<Document>, RemoteError>) + Send + Sync;

enum Watcher {
    Document {
        reference: DocumentRef,
        listener: Arc<DocFn>,
    },
    Query {
        query: CollectionQuery,
        listener: Arc<QueryFn>,
    },
}

impl Watcher {
    fn collection(&self) -> &str {
        match self {
            Watcher::Document { reference, .. } => &reference.collection,
            Watcher::Query { query, .. } => &query.collection,
        }
    }
}

/// A pending delivery, computed under the lock and invoked outside it
enum Delivery {
    Document(Arc<DocFn>, std::result::Result<Option<Document>, RemoteError>),
    Query(Arc<QueryFn>, std::result::Result<Vec<Document>, RemoteError>),
}

impl Delivery {
    fn deliver(self) {
        match self {
            Delivery::Document(listener, event) => listener(event),
            Delivery::Query(listener, event) => listener(event),
        }
    }
}

#[derive(Default)]
struct Inner {
    collections: RwLock<BTreeMap<String, BTreeMap<String, Value>>>,
    watchers: Mutex<HashMap<u64, Watcher>>,
    next_id: AtomicU64,
}

impl Inner {
    fn document(&self, reference: &DocumentRef) -> Option<Document> {
        self.collections
            .read()
            .get(&reference.collection)
            .and_then(|docs| docs.get(&reference.id))
            .map(|fields| Document::new(reference.id.clone(), fields.clone()))
    }

    fn query(&self, query: &CollectionQuery) -> Vec<Document> {
        let mut documents: Vec<Document> = self
            .collections
            .read()
            .get(&query.collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| query.matches(fields))
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();
        query.arrange(&mut documents);
        documents
    }

    fn register(&self, watcher: Watcher) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.watchers.lock().insert(id, watcher);
        id
    }

    /// Snapshots for every watcher affected by a change to `collection`
    fn deliveries_for(&self, collection: &str, changed_id: Option<&str>) -> Vec<Delivery> {
        let watchers = self.watchers.lock();
        watchers
            .values()
            .filter(|watcher| watcher.collection() == collection)
            .filter_map(|watcher| match watcher {
                Watcher::Document {
                    reference,
                    listener,
                } => {
                    if changed_id.is_some_and(|id| id != reference.id) {
                        return None;
                    }
                    Some(Delivery::Document(
                        listener.clone(),
                        Ok(self.document(reference)),
                    ))
                }
                Watcher::Query { query, listener } => {
                    Some(Delivery::Query(listener.clone(), Ok(self.query(query))))
                }
            })
            .collect()
    }

    fn handle_for(self: &Arc<Self>, id: u64) -> SubscriptionHandle {
        let inner: Weak<Inner> = Arc::downgrade(self);
        SubscriptionHandle::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.watchers.lock().remove(&id);
                debug!(watcher = id, "Memory store watcher removed");
            }
        })
    }
}

/// In-memory [`DocumentStore`]
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document, notifying watchers of its collection
    pub fn put<T: Serialize>(&self, collection: &str, id: &str, fields: &T) -> Result<()> {
        let value = serde_json::to_value(fields)?;
        self.put_value(collection, id, value);
        Ok(())
    }

    pub fn put_value(&self, collection: &str, id: &str, fields: Value) {
        self.inner
            .collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        debug!(collection, id, "Memory store document written");
        self.publish(collection, Some(id));
    }

    /// Remove a document. Returns whether it existed.
    pub fn delete(&self, collection: &str, id: &str) -> bool {
        let removed = self
            .inner
            .collections
            .write()
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_some();
        if removed {
            debug!(collection, id, "Memory store document deleted");
            self.publish(collection, Some(id));
        }
        removed
    }

    pub fn get(&self, reference: &DocumentRef) -> Option<Document> {
        self.inner.document(reference)
    }

    /// Deliver `error` to every watcher of `collection`
    pub fn fail(&self, collection: &str, error: RemoteError) {
        let deliveries: Vec<Delivery> = {
            let watchers = self.inner.watchers.lock();
            watchers
                .values()
                .filter(|watcher| watcher.collection() == collection)
                .map(|watcher| match watcher {
                    Watcher::Document { listener, .. } => {
                        Delivery::Document(listener.clone(), Err(error.clone()))
                    }
                    Watcher::Query { listener, .. } => {
                        Delivery::Query(listener.clone(), Err(error.clone()))
                    }
                })
                .collect()
        };
        deliveries.into_iter().for_each(Delivery::deliver);
    }

    /// Number of registered watchers
    pub fn watcher_count(&self) -> usize {
        self.inner.watchers.lock().len()
    }

    fn publish(&self, collection: &str, changed_id: Option<&str>) {
        for delivery in self.inner.deliveries_for(collection, changed_id) {
            delivery.deliver();
        }
    }
}

impl DocumentStore for MemoryStore {
    fn watch_document(
        &self,
        reference: &DocumentRef,
        listener: DocumentListener,
    ) -> SubscriptionHandle {
        let listener: Arc<DocFn> = Arc::from(listener);
        let id = self.inner.register(Watcher::Document {
            reference: reference.clone(),
            listener: listener.clone(),
        });
        let handle = self.inner.handle_for(id);
        listener(Ok(self.inner.document(reference)));
        handle
    }

    fn watch_query(&self, query: &CollectionQuery, listener: QueryListener) -> SubscriptionHandle {
        let listener: Arc<QueryFn> = Arc::from(listener);
        let id = self.inner.register(Watcher::Query {
            query: query.clone(),
            listener: listener.clone(),
        });
        let handle = self.inner.handle_for(id);
        listener(Ok(self.inner.query(query)));
        handle
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("collections", &self.inner.collections.read().len())
            .field("watchers", &self.watcher_count())
            .finish()
    }
}
