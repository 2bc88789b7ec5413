//! Placard Common Utilities
//!
//! Shared infrastructure for all Placard crates:
//! - Error types and result aliases
//! - Event configuration loading
//! - Tracing/logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
