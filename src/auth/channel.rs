//! Authentication channel boundary

use crate::core::models::Principal;
use crate::core::subscription::SubscriptionHandle;
use crate::utils::error::RemoteError;

/// Callback receiving authentication state changes
pub type AuthListener = Box<dyn Fn(Result<Option<Principal>, RemoteError>) + Send + Sync>;

/// Push-based authentication channel.
///
/// Channels do not replay their current state to new listeners; callers read
/// [`AuthChannel::current_principal`] right after subscribing.
#[cfg_attr(test, mockall::automock)]
pub trait AuthChannel: Send + Sync {
    /// Principal signed in right now, if any
    fn current_principal(&self) -> Option<Principal>;

    /// Subscribe to sign-in and sign-out notifications
    fn watch_auth_state(&self, listener: AuthListener) -> SubscriptionHandle;
}
