//! Error handling utilities
//!
//! This module provides the crate-wide error type and the cloneable remote error
//! carried inside subscription state.

pub mod error;

pub use error::*;
