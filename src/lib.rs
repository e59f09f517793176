//! appshell - cache-busting bootloader for offline application shells
//!
//! Decides at page load whether the cached application shell is stale,
//! swaps in a freshly fetched copy of the entry document if it is, and
//! starts the application exactly once either way.

pub mod artifacts;
pub mod boot;
pub mod cache;
pub mod cli;
pub mod config;
pub mod dom;
pub mod error;
pub mod host;
pub mod ui;

pub use error::{AppshellError, AppshellResult};
