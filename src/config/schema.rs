//! Configuration schema for appshell
//!
//! Configuration is stored at `~/.config/appshell/config.toml`, with an
//! optional project-local `.appshell.toml` layered on top.

use crate::error::AppshellResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Bootloader settings
    pub boot: BootConfig,

    /// Shadow index fetch settings
    pub fetch: FetchConfig,

    /// Application configuration handed to the app entry point
    pub app: toml::Table,
}

impl Config {
    /// The `[app]` table as the JSON object the application receives
    pub fn app_config(&self) -> AppshellResult<serde_json::Value> {
        Ok(serde_json::to_value(&self.app)?)
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Bootloader settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Root URL the application is deployed under (always ends with "/")
    pub root_url: String,

    /// File name of the shadow entry document
    pub shadow_document: String,

    /// How long to wait for the cache check before booting anyway
    pub check_timeout_ms: u64,

    /// File name the bootloader script is published under
    pub bootloader_script: String,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            root_url: "/".to_string(),
            shadow_document: "appshell.html".to_string(),
            check_timeout_ms: 500,
            bootloader_script: "bootloader.js".to_string(),
        }
    }
}

impl BootConfig {
    /// Relative URL of the shadow entry document
    pub fn shadow_url(&self) -> String {
        format!("{}{}", self.root_url, self.shadow_document)
    }

    /// Relative URL of the bootloader script
    pub fn bootloader_url(&self) -> String {
        format!("{}{}", self.root_url, self.bootloader_script)
    }

    /// Deadline for the cache check race
    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }
}

/// Shadow index fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Origin relative URLs are resolved against
    pub origin: String,

    /// Overall request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:4200".to_string(),
            timeout_secs: 10,
        }
    }
}

impl FetchConfig {
    /// Absolute URL for a root-relative path
    pub fn resolve(&self, path: &str) -> String {
        let origin = self.origin.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", origin, path)
        } else {
            format!("{}/{}", origin, path)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
