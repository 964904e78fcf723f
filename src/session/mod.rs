//! Current-user session
//!
//! One context per active session composing the identity binding, the directory
//! subscription that feeds the hierarchy, and the permission matrix. Pages ask it
//! "who am I, what can I do, who do I manage".

mod context;
mod types;

pub use context::{CurrentUserContext, SessionServices};
pub use types::{Access, Denial, SessionState};
