//! Common test utilities for assetdesk
//!
//! # Usage
//!
//! ```rust
//! use crate::common::fixtures::DeskFixture;
//!
//! #[test]
//! fn my_test() {
//!     let desk = DeskFixture::new();
//!     desk.sign_in_admin("a-1");
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod stores;

// Re-export commonly used items
pub use fixtures::{AssetFactory, AssociateFactory, DeskFixture, PrincipalFactory};
pub use stores::ManualStore;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
