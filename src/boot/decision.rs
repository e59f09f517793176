//! Cache status decision
//!
//! The status is sampled once. While the cache is still checking, the first
//! of four events or the timeout settles the outcome; everything after that
//! is ignored rather than unsubscribed.

use super::bust::cache_bust;
use super::{log, BootContext};
use crate::cache::{ApplicationCache, CacheEvent, CacheStatus};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// What to do given the status observed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Content on the page is current
    Boot,
    /// A check is in flight; wait for its outcome
    Race,
    /// The cache already moved past checking; fetch fresh content
    Bust,
}

impl Decision {
    /// `None` means the page has no application cache
    pub fn for_status(status: Option<CacheStatus>) -> Self {
        match status {
            // Idle means a check already finished and found nothing new
            None | Some(CacheStatus::Uncached) | Some(CacheStatus::Idle) => Self::Boot,
            Some(CacheStatus::Checking) => Self::Race,
            Some(CacheStatus::Downloading)
            | Some(CacheStatus::UpdateReady)
            | Some(CacheStatus::Obsolete) => Self::Bust,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Boot => "Appcache is idle or missing",
            Self::Race => "Appcache is checking",
            Self::Bust => "Appcache is downloading, updateready or obsolete",
        }
    }
}

/// How a checking race was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate,
    CacheError,
    Obsolete,
    Downloading,
    TimedOut,
}

impl CheckOutcome {
    /// Cache events that settle a race
    pub const EVENTS: [(CacheEvent, CheckOutcome); 4] = [
        (CacheEvent::NoUpdate, Self::UpToDate),
        (CacheEvent::Error, Self::CacheError),
        (CacheEvent::Obsolete, Self::Obsolete),
        (CacheEvent::Downloading, Self::Downloading),
    ];

    /// Whether this outcome means fresh content must be fetched
    pub fn needs_bust(&self) -> bool {
        matches!(self, Self::Obsolete | Self::Downloading)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::UpToDate => "Appcache is up-to-date",
            Self::CacheError => "Appcache encountered error",
            Self::Obsolete => "Appcache is obsolete",
            Self::Downloading => "Appcache is downloading update",
            Self::TimedOut => "- Checking for update is taking too long",
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A checking race; the first `settle` wins
pub(crate) struct CheckRace {
    waiting: Cell<bool>,
    ctx: Rc<BootContext>,
}

impl CheckRace {
    /// Listen for the settling events and arm the timeout
    pub(crate) fn start(ctx: Rc<BootContext>, cache: &dyn ApplicationCache) {
        let race = Rc::new(Self {
            waiting: Cell::new(true),
            ctx: ctx.clone(),
        });

        for (event, outcome) in CheckOutcome::EVENTS {
            let race = race.clone();
            cache.add_event_listener(event, Rc::new(move || race.settle(outcome)));
        }

        let timed_out = race.clone();
        ctx.timers.set_timeout(
            ctx.config.check_timeout(),
            Box::new(move || timed_out.settle(CheckOutcome::TimedOut)),
        );
    }

    pub(crate) fn settle(&self, outcome: CheckOutcome) {
        if !self.waiting.replace(false) {
            debug!("Ignoring late check outcome: {}", outcome);
            return;
        }
        log(outcome.message());
        if outcome.needs_bust() {
            cache_bust(self.ctx.clone());
        } else {
            self.ctx.gate.allow_boot();
        }
    }
}
