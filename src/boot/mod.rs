//! The page-load bootloader
//!
//! Runs once per page load and decides whether the cached application shell
//! can boot as is, or whether fresh content must be fetched and swapped in
//! first. Whatever happens, the application is started exactly once.
//!
//! ```text
//!             status
//!   absent/uncached/idle ──────────────────────────────► boot
//!   checking ──► noupdate | error | timeout ───────────► boot
//!            └─► obsolete | downloading ──► bust ──┐
//!   downloading/updateready/obsolete ─────► bust ──┴──► replace head, body
//!                                                       wait for scripts ──► boot
//! ```

mod bust;
mod decision;
mod gate;
mod guard;
mod replace;
mod scripts;

pub use decision::{CheckOutcome, Decision};
pub use gate::{BootGate, BootTarget};
pub use guard::ReentranceGuard;
pub use replace::replace;
pub use scripts::ScriptWaitSet;

use crate::cache::ApplicationCache;
use crate::config::BootConfig;
use crate::dom::Document;
use crate::host::{ErrorReporter, LogReporter, ShadowFetcher, Timers};
use decision::CheckRace;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// Tag prefixed to every bootloader log line
pub const LOG_TAG: &str = "[appshell]";

pub(crate) fn log(message: &str) {
    info!("{} {}", LOG_TAG, message);
}

/// Page-wide state the bootloader reads and writes
pub struct Page {
    pub document: Rc<Document>,
    /// `None` when the page has no application cache
    pub cache: Option<Rc<dyn ApplicationCache>>,
    running: ReentranceGuard,
    shadow_index: RefCell<Option<String>>,
}

impl Page {
    pub fn new(document: Rc<Document>, cache: Option<Rc<dyn ApplicationCache>>) -> Self {
        Self {
            document,
            cache,
            running: ReentranceGuard::new(),
            shadow_index: RefCell::new(None),
        }
    }

    /// Whether a bootloader has already started on this page
    pub fn bootloader_running(&self) -> bool {
        self.running.is_entered()
    }

    /// Raw markup of the last shadow index swapped in
    pub fn shadow_index(&self) -> Option<String> {
        self.shadow_index.borrow().clone()
    }

    fn retain_shadow_index(&self, html: String) {
        *self.shadow_index.borrow_mut() = Some(html);
    }
}

/// Result of [`Bootloader::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootRun {
    /// Another bootloader already ran on this page
    Skipped,
    /// This run took charge of booting the page
    Started(Decision),
}

pub(crate) struct BootContext {
    config: BootConfig,
    page: Rc<Page>,
    gate: Rc<BootGate>,
    timers: Rc<dyn Timers>,
    fetcher: Rc<dyn ShadowFetcher>,
    reporter: Rc<dyn ErrorReporter>,
}

/// The bootloader and its host collaborators
pub struct Bootloader {
    config: BootConfig,
    timers: Rc<dyn Timers>,
    fetcher: Rc<dyn ShadowFetcher>,
    reporter: Rc<dyn ErrorReporter>,
    target: BootTarget,
}

impl Bootloader {
    pub fn new(
        config: BootConfig,
        timers: Rc<dyn Timers>,
        fetcher: Rc<dyn ShadowFetcher>,
        target: BootTarget,
    ) -> Self {
        Self {
            config,
            timers,
            fetcher,
            reporter: Rc::new(LogReporter),
            target,
        }
    }

    /// Send errors raised after boot somewhere other than the log
    pub fn with_reporter(mut self, reporter: Rc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Run against `page`; does nothing if a bootloader already ran there
    pub fn run(&self, page: &Rc<Page>) -> BootRun {
        if !page.running.enter() {
            return BootRun::Skipped;
        }

        let ctx = Rc::new(BootContext {
            config: self.config.clone(),
            page: page.clone(),
            gate: Rc::new(BootGate::new(page.document.clone(), self.target.clone())),
            timers: self.timers.clone(),
            fetcher: self.fetcher.clone(),
            reporter: self.reporter.clone(),
        });

        let status = page.cache.as_ref().map(|cache| cache.status());
        let decision = Decision::for_status(status);
        log(decision.message());

        match decision {
            Decision::Boot => ctx.gate.allow_boot(),
            Decision::Race => {
                if let Some(cache) = page.cache.clone() {
                    CheckRace::start(ctx, cache.as_ref());
                }
            }
            Decision::Bust => bust::cache_bust(ctx),
        }
        BootRun::Started(decision)
    }
}

/// `<script>` tag that loads the bootloader from the entry document's head
pub fn bootloader_tag(config: &BootConfig) -> String {
    format!("<script src=\"{}\"></script>", config.bootloader_url())
}
