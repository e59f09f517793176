//! CLI command implementations

pub mod boot;
pub mod check;
pub mod config;
pub mod snippet;

pub use boot::execute as boot;
pub use check::execute as check;
pub use config::execute as config;
pub use snippet::execute as snippet;
