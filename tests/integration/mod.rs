//! Integration tests for assetdesk
//!
//! These tests verify the interaction between the session, the bindings and
//! the in-memory or manual backends.

pub mod session_tests;
pub mod subscription_tests;
