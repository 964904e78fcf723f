//! Utility modules
//!
//! - **error**: Error types shared by every module
//! - **logging**: `tracing` subscriber setup

pub mod error;
pub mod logging;

pub use error::{DeskError, RemoteError, RemoteErrorKind, Result};
