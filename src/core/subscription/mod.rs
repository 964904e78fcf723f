//! Reactive subscription primitive
//!
//! A [`Binding`] keeps a `(data, loading, error)` tuple in sync with one remote
//! source at a time. Sources are anything implementing [`LiveSource`]: a single
//! document, a collection query, or the authentication channel.

mod binding;
mod handle;
mod sources;
mod state;

pub use binding::{Binding, EventSink, LiveSource, Observer};
pub use handle::SubscriptionHandle;
pub use sources::{DocumentBinding, DocumentSource, QueryBinding, QuerySource};
pub use state::SubscriptionState;
