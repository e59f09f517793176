//! Terminal output for the CLI
//!
//! Uses `cliclack` in interactive terminals and falls back to plain,
//! prefix-tagged lines in CI and when output is piped.

mod context;
mod output;

pub use context::UiContext;
pub use output::{finding, intro, key_value, outro, remark, step, Step};
