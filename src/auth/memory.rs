//! In-process authentication channel

use super::channel::{AuthChannel, AuthListener};
use crate::core::models::Principal;
use crate::core::subscription::SubscriptionHandle;
use crate::utils::error::RemoteError;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::info;

type ListenerFn = dyn Fn(Result<Option<Principal>, RemoteError>) + Send + Sync;

#[derive(Default)]
struct Inner {
    current: RwLock<Option<Principal>>,
    listeners: Mutex<HashMap<u64, Arc<ListenerFn>>>,
    next_id: AtomicU64,
}

impl Inner {
    fn broadcast(&self, event: Result<Option<Principal>, RemoteError>) {
        let listeners: Vec<Arc<ListenerFn>> = self.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener(event.clone());
        }
    }
}

/// Authentication channel holding the signed-in principal in memory
#[derive(Clone, Default)]
pub struct MemoryAuthChannel {
    inner: Arc<Inner>,
}

impl MemoryAuthChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, principal: Principal) {
        info!(principal = %principal.id, role = %principal.role, "Signed in");
        *self.inner.current.write() = Some(principal.clone());
        self.inner.broadcast(Ok(Some(principal)));
    }

    pub fn sign_out(&self) {
        let previous = self.inner.current.write().take();
        if let Some(principal) = previous {
            info!(principal = %principal.id, "Signed out");
        }
        self.inner.broadcast(Ok(None));
    }

    /// Report a channel failure to every listener
    pub fn fail(&self, error: RemoteError) {
        self.inner.broadcast(Err(error));
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

impl AuthChannel for MemoryAuthChannel {
    fn current_principal(&self) -> Option<Principal> {
        self.inner.current.read().clone()
    }

    fn watch_auth_state(&self, listener: AuthListener) -> SubscriptionHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        self.inner.listeners.lock().insert(id, Arc::from(listener));
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        SubscriptionHandle::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.lock().remove(&id);
            }
        })
    }
}
