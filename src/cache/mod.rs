//! Offline application cache as seen from the page
//!
//! The browser owns the cache; the bootloader only samples its status once
//! at startup and then listens for a handful of events.
//!
//! # Status
//!
//! | Code | Status | Bootloader reaction |
//! |------|--------|---------------------|
//! | - | absent | boot |
//! | 0 | uncached | boot |
//! | 1 | idle | boot (the check already found nothing new) |
//! | 2 | checking | race events against a timeout |
//! | 3 | downloading | bust |
//! | 4 | updateready | bust |
//! | 5 | obsolete | bust |

mod simulated;

pub use simulated::SimulatedCache;

use crate::error::AppshellError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Callback attached to a cache event
pub type Listener = Rc<dyn Fn()>;

/// Status of the application cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Uncached,
    Idle,
    Checking,
    Downloading,
    UpdateReady,
    Obsolete,
}

impl CacheStatus {
    pub const ALL: [CacheStatus; 6] = [
        Self::Uncached,
        Self::Idle,
        Self::Checking,
        Self::Downloading,
        Self::UpdateReady,
        Self::Obsolete,
    ];

    /// Map the numeric constant exposed by the browser
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Numeric constant exposed by the browser
    pub fn code(&self) -> u16 {
        match self {
            Self::Uncached => 0,
            Self::Idle => 1,
            Self::Checking => 2,
            Self::Downloading => 3,
            Self::UpdateReady => 4,
            Self::Obsolete => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uncached => "uncached",
            Self::Idle => "idle",
            Self::Checking => "checking",
            Self::Downloading => "downloading",
            Self::UpdateReady => "updateready",
            Self::Obsolete => "obsolete",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheStatus {
    type Err = AppshellError;

    /// Accepts a status name or its numeric constant
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = match s.parse::<u16>() {
            Ok(code) => Self::from_code(code),
            Err(_) => Self::ALL
                .into_iter()
                .find(|status| status.as_str().eq_ignore_ascii_case(s)),
        };
        found.ok_or_else(|| {
            let names: Vec<_> = Self::ALL.iter().map(CacheStatus::as_str).collect();
            AppshellError::User(format!(
                "unknown cache status: {} (expected 0-5 or one of {})",
                s,
                names.join(", ")
            ))
        })
    }
}

/// Events fired by the application cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CacheEvent {
    Checking,
    Error,
    #[value(name = "noupdate")]
    NoUpdate,
    Downloading,
    Progress,
    #[value(name = "updateready")]
    UpdateReady,
    Cached,
    Obsolete,
}

impl CacheEvent {
    /// DOM event type name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Error => "error",
            Self::NoUpdate => "noupdate",
            Self::Downloading => "downloading",
            Self::Progress => "progress",
            Self::UpdateReady => "updateready",
            Self::Cached => "cached",
            Self::Obsolete => "obsolete",
        }
    }
}

impl fmt::Display for CacheEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The page's view of the application cache
pub trait ApplicationCache {
    /// Current status
    fn status(&self) -> CacheStatus;

    /// Attach a listener for `event`; listeners are never removed
    fn add_event_listener(&self, event: CacheEvent, listener: Listener);
}
