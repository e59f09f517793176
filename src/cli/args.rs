//! CLI argument definitions using clap derive

use crate::cache::{CacheEvent, CacheStatus};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// appshell - cache-busting bootloader for offline application shells
///
/// Runs the page-load bootloader against a simulated application cache
/// and checks the build artifacts it depends on.
#[derive(Parser, Debug)]
#[command(name = "appshell")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "APPSHELL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .appshell.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bootloader against an entry document
    Boot(BootArgs),

    /// Verify index.html, the shadow document and the manifest
    Check(CheckArgs),

    /// Print the script tag that loads the bootloader
    Snippet,

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the boot command
#[derive(Parser, Debug)]
pub struct BootArgs {
    /// Entry document loaded as the live page
    #[arg(short, long)]
    pub entry: PathBuf,

    /// Application cache status observed at startup (name or code 0-5)
    #[arg(short, long, default_value = "idle", value_parser = parse_status)]
    pub status: CacheStatus,

    /// Run as if the page had no application cache
    #[arg(long, conflicts_with_all = ["status", "event"])]
    pub no_cache: bool,

    /// Cache event fired while the cache is checking
    #[arg(long, value_enum)]
    pub event: Option<CacheEvent>,

    /// Delay before the cache event fires
    #[arg(long, default_value = "100")]
    pub event_delay_ms: u64,

    /// Origin the shadow document is fetched from
    #[arg(long)]
    pub origin: Option<String>,

    /// Override the cache check timeout
    #[arg(long)]
    pub check_timeout_ms: Option<u64>,

    /// Give up if the application has not booted after this many seconds
    #[arg(long, default_value = "30")]
    pub boot_timeout_secs: u64,

    /// Write the booted document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Build output directory
    #[arg(short, long, default_value = "dist")]
    pub dist: PathBuf,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., boot.check_timeout_ms)
        key: String,
        /// Value to set
        value: String,
    },
}

fn parse_status(value: &str) -> Result<CacheStatus, String> {
    value
        .parse()
        .map_err(|e: crate::error::AppshellError| e.to_string())
}
