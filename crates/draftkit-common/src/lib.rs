//! Shared utilities for draftkit crates
//!
//! Kept free of dependencies on other draftkit crates so every crate in the
//! workspace can depend on it.

pub mod logging;

pub use logging::{format_error, init, LogLevel, LogOptions, LoggingError};
