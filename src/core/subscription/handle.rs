//! Cancellable subscription handle

use parking_lot::Mutex;
use std::fmt;

type CancelFn = Box<dyn FnOnce() + Send>;

/// Handle to one live remote subscription.
///
/// Cancelling is idempotent: the cancel callback runs at most once, whether it is
/// triggered by [`SubscriptionHandle::cancel`] or by dropping the handle.
pub struct SubscriptionHandle {
    cancel: Mutex<Option<CancelFn>>,
}

impl SubscriptionHandle {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Handle with nothing to release
    pub fn noop() -> Self {
        Self {
            cancel: Mutex::new(None),
        }
    }

    /// Stop the subscription. Returns `true` only for the call that released it.
    pub fn cancel(&self) -> bool {
        // Take under the lock, run outside it: the callback may re-enter the store.
        let cancel = self.cancel.lock().take();
        match cancel {
            Some(cancel) => {
                cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.lock().is_none()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.get_mut().take() {
            cancel();
        }
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
