//! Error types for appshell
//!
//! All modules use `AppshellResult<T>` as their return type.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for appshell operations
pub type AppshellResult<T> = Result<T, AppshellError>;

/// All errors that can occur in appshell
#[derive(Error, Debug)]
pub enum AppshellError {
    // Shadow index errors
    #[error("Failed to fetch shadow index {url}: HTTP {status}")]
    ShadowStatus { url: String, status: u16 },

    #[error("Failed to fetch shadow index {url}: {reason}")]
    ShadowNetwork { url: String, reason: String },

    // Boot errors
    #[error("Application did not boot within {0:?}")]
    BootTimeout(Duration),

    // Artifact errors
    #[error("Build artifact check failed: {0}")]
    ArtifactMismatch(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl AppshellError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a network error for the shadow index fetch
    pub fn shadow_network(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::ShadowNetwork {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error came from fetching the shadow index
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::ShadowStatus { .. } | Self::ShadowNetwork { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ShadowStatus { status: 404, .. } => {
                Some("Deploy appshell.html next to index.html, or set boot.shadow_document")
            }
            Self::ShadowNetwork { .. } => Some("Check fetch.origin or pass --origin"),
            Self::BootTimeout(_) => Some("Inserted scripts never reported load, error or abort"),
            _ => None,
        }
    }
}
