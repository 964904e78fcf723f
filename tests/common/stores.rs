//! Document store fakes
//!
//! `ManualStore` records every subscription and only delivers when the test
//! says so. Cancelled subscriptions stay reachable, so tests can fire the late
//! callbacks a real backend may still deliver after unsubscribe.

use assetdesk::core::subscription::SubscriptionHandle;
use assetdesk::storage::{
    CollectionQuery, Document, DocumentListener, DocumentRef, DocumentStore, QueryListener,
};
use assetdesk::utils::error::RemoteError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

type DocumentFn = Arc<dyn Fn(Result<Option<Document>, RemoteError>) + Send + Sync>;
type QueryFn = Arc<dyn Fn(Result<Vec<Document>, RemoteError>) + Send + Sync>;

enum Listener {
    Document(DocumentRef, DocumentFn),
    Query(CollectionQuery, QueryFn),
}

struct Subscription {
    listener: Listener,
    cancelled: Arc<AtomicBool>,
}

/// Store whose deliveries are driven by the test
#[derive(Default)]
pub struct ManualStore {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl ManualStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Subscriptions opened so far, cancelled ones included
    pub fn opened(&self) -> usize {
        self.subscriptions.lock().len()
    }

    /// Subscriptions not yet cancelled
    pub fn live(&self) -> usize {
        self.subscriptions
            .lock()
            .iter()
            .filter(|s| !s.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Deliver to the `index`-th subscription ever opened, cancelled or not
    pub fn fire_query_at(&self, index: usize, event: Result<Vec<Document>, RemoteError>) {
        let listener = match self.subscriptions.lock().get(index).map(|s| &s.listener) {
            Some(Listener::Query(_, listener)) => listener.clone(),
            _ => panic!("subscription {} is not a query", index),
        };
        listener(event);
    }

    /// Deliver to the `index`-th subscription ever opened, cancelled or not
    pub fn fire_document_at(&self, index: usize, event: Result<Option<Document>, RemoteError>) {
        let listener = match self.subscriptions.lock().get(index).map(|s| &s.listener) {
            Some(Listener::Document(_, listener)) => listener.clone(),
            _ => panic!("subscription {} is not a document", index),
        };
        listener(event);
    }

    /// Query of the `index`-th subscription
    pub fn query_at(&self, index: usize) -> Option<CollectionQuery> {
        match self.subscriptions.lock().get(index).map(|s| &s.listener) {
            Some(Listener::Query(query, _)) => Some(query.clone()),
            _ => None,
        }
    }

    /// Reference of the `index`-th subscription
    pub fn reference_at(&self, index: usize) -> Option<DocumentRef> {
        match self.subscriptions.lock().get(index).map(|s| &s.listener) {
            Some(Listener::Document(reference, _)) => Some(reference.clone()),
            _ => None,
        }
    }

    fn register(&self, listener: Listener) -> SubscriptionHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.subscriptions.lock().push(Subscription {
            listener,
            cancelled: cancelled.clone(),
        });
        SubscriptionHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}

impl DocumentStore for ManualStore {
    fn watch_document(
        &self,
        reference: &DocumentRef,
        listener: DocumentListener,
    ) -> SubscriptionHandle {
        self.register(Listener::Document(reference.clone(), Arc::from(listener)))
    }

    fn watch_query(&self, query: &CollectionQuery, listener: QueryListener) -> SubscriptionHandle {
        self.register(Listener::Query(query.clone(), Arc::from(listener)))
    }
}
