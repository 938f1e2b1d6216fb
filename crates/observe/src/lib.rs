//! This crate is intended to contain code that is required to provide or
//! improve the observability of the binaries. For now that is the
//! initialization logic for logging.
pub mod config;
pub mod tracing;

pub use config::Config;
