//! Subscription state tuple

use crate::utils::error::RemoteError;

/// Loading, error and data state of one binding
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionState<V> {
    /// Last decoded value, kept across errors
    pub data: Option<V>,
    /// True only between bind and the first event from the bound source
    pub loading: bool,
    /// Last reported failure, cleared by the next successful event
    pub error: Option<RemoteError>,
}

impl<V> SubscriptionState<V> {
    /// State right after binding a concrete source
    pub fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    /// State of a binding with no source
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.loading
    }

    pub(crate) fn apply(&mut self, event: Result<V, RemoteError>) {
        match event {
            Ok(value) => {
                self.data = Some(value);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err);
            }
        }
        self.loading = false;
    }
}

impl<V> Default for SubscriptionState<V> {
    fn default() -> Self {
        Self::pending()
    }
}
