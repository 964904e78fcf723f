//! Live binding of local state to one remote source

use super::handle::SubscriptionHandle;
use super::state::SubscriptionState;
use crate::utils::error::RemoteError;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tracing::{debug, warn};

/// A remote source a [`Binding`] can attach to
pub trait LiveSource: Send + Sync + 'static {
    /// Value delivered on each successful event
    type Value: Clone + Send + Sync + 'static;

    /// Short description used in logs
    fn describe(&self) -> String;

    /// Open the remote subscription, delivering every event into `sink`
    fn open(&self, sink: EventSink<Self::Value>) -> SubscriptionHandle;
}

/// Synchronous observer invoked after every state change
pub type Observer<V> = Arc<dyn Fn(&SubscriptionState<V>) + Send + Sync>;

struct Shared<V> {
    label: String,
    /// Generation of the subscription allowed to write state
    generation: Mutex<u64>,
    state: watch::Sender<SubscriptionState<V>>,
    observers: Mutex<Vec<Observer<V>>>,
}

impl<V: Clone + Send + Sync + 'static> Shared<V> {
    fn notify(&self) {
        let observers = self.observers.lock().clone();
        if observers.is_empty() {
            return;
        }
        let snapshot = self.state.borrow().clone();
        for observer in observers {
            observer(&snapshot);
        }
    }

    fn current_generation(&self) -> u64 {
        *self.generation.lock()
    }
}

/// Entry point for events of one opened subscription.
///
/// Each sink is stamped with the generation it was opened under. Once the
/// binding rebinds or releases, the sink's events are discarded.
pub struct EventSink<V> {
    shared: Weak<Shared<V>>,
    generation: u64,
}

impl<V> Clone for EventSink<V> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            generation: self.generation,
        }
    }
}

impl<V: Clone + Send + Sync + 'static> EventSink<V> {
    /// Deliver one event. Returns `false` when the event was discarded.
    pub fn emit(&self, event: Result<V, RemoteError>) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };

        {
            let current = shared.generation.lock();
            if *current != self.generation {
                debug!(
                    binding = %shared.label,
                    stale = self.generation,
                    current = *current,
                    "Dropping event from a released subscription"
                );
                return false;
            }
            if let Err(err) = &event {
                warn!(binding = %shared.label, error = %err, "Remote source reported an error");
            }
            shared.state.send_modify(|state| state.apply(event));
        }

        shared.notify();
        true
    }

    /// Whether events from this sink would still be applied
    pub fn is_current(&self) -> bool {
        self.shared
            .upgrade()
            .is_some_and(|shared| shared.current_generation() == self.generation)
    }
}

struct ActiveSubscription {
    description: String,
    handle: SubscriptionHandle,
}

/// Live binding of a state tuple to at most one remote subscription.
///
/// Binding a new source always tears the previous subscription down first, and
/// any late event from a torn-down subscription is dropped. Dropping the binding
/// releases its subscription.
pub struct Binding<S: LiveSource> {
    shared: Arc<Shared<S::Value>>,
    active: Mutex<Option<ActiveSubscription>>,
}

impl<S: LiveSource> Binding<S> {
    /// Create an unbound binding. It stays idle until the first bind.
    pub fn new(label: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SubscriptionState::idle());
        Self {
            shared: Arc::new(Shared {
                label: label.into(),
                generation: Mutex::new(0),
                state,
                observers: Mutex::new(Vec::new()),
            }),
            active: Mutex::new(None),
        }
    }

    /// Create a binding and bind it straight away
    pub fn bound(label: impl Into<String>, source: Option<S>) -> Self {
        let binding = Self::new(label);
        binding.bind(source);
        binding
    }

    pub fn label(&self) -> &str {
        &self.shared.label
    }

    /// Attach to `source`, or to nothing when it is `None`.
    ///
    /// The previous subscription is cancelled before the new one opens. With no
    /// source the state settles to idle without any remote call.
    pub fn bind(&self, source: Option<S>) {
        let generation = self.advance();
        self.cancel_active();

        let Some(source) = source else {
            debug!(binding = %self.shared.label, "Bound to absent source");
            self.shared.state.send_replace(SubscriptionState::idle());
            self.shared.notify();
            return;
        };

        let description = source.describe();
        self.shared.state.send_replace(SubscriptionState::pending());
        self.shared.notify();

        // An observer may have rebound us while being notified.
        if self.shared.current_generation() != generation {
            return;
        }

        debug!(
            binding = %self.shared.label,
            source = %description,
            generation,
            "Opening subscription"
        );
        let sink = EventSink {
            shared: Arc::downgrade(&self.shared),
            generation,
        };
        let handle = source.open(sink);

        let mut active = self.active.lock();
        if self.shared.current_generation() == generation {
            *active = Some(ActiveSubscription {
                description,
                handle,
            });
        } else {
            drop(active);
            debug!(binding = %self.shared.label, source = %description, "Superseded while opening");
            handle.cancel();
        }
    }

    /// Tear down the live subscription, if any. State keeps its last value,
    /// except that a pending load settles since no event can arrive anymore.
    ///
    /// Returns `true` only when a subscription was actually released.
    pub fn release(&self) -> bool {
        self.advance();
        let released = self.cancel_active();
        if released {
            debug!(binding = %self.shared.label, "Released subscription");
        }

        let settled = self.shared.state.send_if_modified(|state| {
            let was_loading = state.loading;
            state.loading = false;
            was_loading
        });
        if settled {
            self.shared.notify();
        }
        released
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SubscriptionState<S::Value> {
        self.shared.state.borrow().clone()
    }

    pub fn data(&self) -> Option<S::Value> {
        self.shared.state.borrow().data.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().loading
    }

    pub fn error(&self) -> Option<RemoteError> {
        self.shared.state.borrow().error.clone()
    }

    /// Whether a remote subscription is currently open
    pub fn is_active(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Description of the source currently bound
    pub fn source_description(&self) -> Option<String> {
        self.active
            .lock()
            .as_ref()
            .map(|active| active.description.clone())
    }

    /// Receiver for async consumers; sees every state change
    pub fn watch(&self) -> watch::Receiver<SubscriptionState<S::Value>> {
        self.shared.state.subscribe()
    }

    /// Register a synchronous observer invoked after every state change
    pub fn on_change<F>(&self, observer: F)
    where
        F: Fn(&SubscriptionState<S::Value>) + Send + Sync + 'static,
    {
        self.shared.observers.lock().push(Arc::new(observer));
    }

    fn advance(&self) -> u64 {
        let mut generation = self.shared.generation.lock();
        *generation += 1;
        *generation
    }

    fn cancel_active(&self) -> bool {
        let previous = self.active.lock().take();
        match previous {
            Some(active) => {
                debug!(
                    binding = %self.shared.label,
                    source = %active.description,
                    "Closing subscription"
                );
                active.handle.cancel()
            }
            None => false,
        }
    }
}

impl<S: LiveSource> Drop for Binding<S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<S: LiveSource> std::fmt::Debug for Binding<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("label", &self.shared.label)
            .field("source", &self.source_description())
            .finish()
    }
}
