//! Identity binding
//!
//! The subscription primitive attached to the authentication channel instead of
//! the document store. Exposes the signed-in principal and a loading flag.

use super::channel::AuthChannel;
use crate::core::models::Principal;
use crate::core::subscription::{
    Binding, EventSink, LiveSource, SubscriptionHandle, SubscriptionState,
};
use crate::utils::error::RemoteError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Authentication channel as a live source
pub struct AuthSource {
    channel: Arc<dyn AuthChannel>,
}

impl AuthSource {
    pub fn new(channel: Arc<dyn AuthChannel>) -> Self {
        Self { channel }
    }
}

impl LiveSource for AuthSource {
    type Value = Option<Principal>;

    fn describe(&self) -> String {
        "auth channel".to_string()
    }

    fn open(&self, sink: EventSink<Self::Value>) -> SubscriptionHandle {
        let listener = sink.clone();
        let handle = self.channel.watch_auth_state(Box::new(move |event| {
            listener.emit(event);
        }));
        // Snapshot after subscribing so no transition in between is lost.
        sink.emit(Ok(self.channel.current_principal()));
        handle
    }
}

/// Live view of the authenticated principal
pub struct IdentityBinding {
    binding: Binding<AuthSource>,
}

impl IdentityBinding {
    /// Unmounted binding; idle with no principal until [`IdentityBinding::mount`]
    pub fn new() -> Self {
        Self {
            binding: Binding::new("identity"),
        }
    }

    /// Subscribe to `channel`. With no channel the binding settles signed out.
    pub fn mount(&self, channel: Option<Arc<dyn AuthChannel>>) {
        if channel.is_none() {
            info!("No authentication channel configured; treating session as signed out");
        }
        self.binding.bind(channel.map(AuthSource::new));
    }

    /// Release the channel subscription. Idempotent.
    pub fn release(&self) -> bool {
        self.binding.release()
    }

    /// Signed-in principal. Absent after a channel failure until the channel
    /// reports a session again.
    pub fn principal(&self) -> Option<Principal> {
        Self::principal_of(&self.binding.state())
    }

    /// Principal carried by an identity state; an error means unauthenticated
    pub fn principal_of(state: &SubscriptionState<Option<Principal>>) -> Option<Principal> {
        if state.error.is_some() {
            return None;
        }
        state.data.clone().flatten()
    }

    pub fn is_loading(&self) -> bool {
        self.binding.is_loading()
    }

    /// Last channel failure, cleared by the next report from the channel
    pub fn error(&self) -> Option<RemoteError> {
        self.binding.error()
    }

    pub fn state(&self) -> SubscriptionState<Option<Principal>> {
        self.binding.state()
    }

    pub fn watch(&self) -> watch::Receiver<SubscriptionState<Option<Principal>>> {
        self.binding.watch()
    }

    pub fn on_change<F>(&self, observer: F)
    where
        F: Fn(&SubscriptionState<Option<Principal>>) + Send + Sync + 'static,
    {
        self.binding.on_change(observer);
    }
}

impl Default for IdentityBinding {
    fn default() -> Self {
        Self::new()
    }
}
