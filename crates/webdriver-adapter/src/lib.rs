//! Thin ownership wrapper over a live WebDriver session.
//!
//! The adapter owns exactly one browser connection for its lifetime and
//! guarantees that `quit` is idempotent, so the caller can release on every
//! exit path without tracking whether a release already happened.

pub mod adapter;
pub mod config;
pub mod errors;

pub use adapter::Driver;
pub use config::DriverConfig;
pub use errors::AdapterError;
