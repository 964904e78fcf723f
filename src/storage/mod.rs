//! Document storage
//!
//! The [`DocumentStore`] boundary consumed by subscriptions, plus an in-process
//! implementation and seed loader.

pub mod memory;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use seed::Seed;
pub use store::{
    CollectionQuery, Document, DocumentListener, DocumentRef, DocumentStore, FieldFilter,
    QueryListener,
};
