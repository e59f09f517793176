//! Deterministic host for driving the bootloader step by step

use appshell::boot::{BootRun, BootTarget, Bootloader, Page};
use appshell::cache::{ApplicationCache, CacheStatus, SimulatedCache};
use appshell::config::BootConfig;
use appshell::dom::{parse_html, Node, ReadyState, ScriptEvent, ScriptHost};
use appshell::host::{ErrorReporter, FetchCallback, ShadowFetcher, ShadowResponse, Timers};
use appshell::{AppshellError, AppshellResult};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub const CURRENT: &str = r#"<!DOCTYPE html>
<html manifest="/manifest.appcache">
<head><script src="/bootloader.js"></script><title>v1</title></head>
<body><script src="/assets/app-v1.js"></script><div id="stale"></div></body>
</html>"#;

pub const SHADOW: &str = r#"<!DOCTYPE html>
<html>
<head><script src="/bootloader.js"></script><title>v2</title></head>
<body><script src="/assets/app-v2.js"></script><script>window.booted = false;</script><div id="root"></div></body>
</html>"#;

/// Timers driven by `advance`
#[derive(Default)]
pub struct ManualTimers {
    now: Cell<Duration>,
    pending: RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>,
}

impl ManualTimers {
    /// Move the clock forward, running every callback that falls due
    pub fn advance(&self, by: Duration) {
        let now = self.now.get() + by;
        self.now.set(now);
        loop {
            let due = {
                let mut pending = self.pending.borrow_mut();
                let next = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (deadline, _))| *deadline <= now)
                    .min_by_key(|(_, (deadline, _))| *deadline)
                    .map(|(index, _)| index);
                next.map(|index| pending.remove(index))
            };
            match due {
                Some((_, callback)) => callback(),
                None => break,
            }
        }
    }

    pub fn armed(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl Timers for ManualTimers {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        self.pending
            .borrow_mut()
            .push((self.now.get() + delay, callback));
    }
}

/// Fetcher whose requests stay open until the test answers them
#[derive(Default)]
pub struct StubFetcher {
    pub requests: RefCell<Vec<String>>,
    pending: RefCell<Vec<FetchCallback>>,
}

impl StubFetcher {
    pub fn respond(&self, result: AppshellResult<ShadowResponse>) {
        let callback = self.pending.borrow_mut().remove(0);
        callback(result);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl ShadowFetcher for StubFetcher {
    fn get(&self, url: &str, done: FetchCallback) {
        self.requests.borrow_mut().push(url.to_string());
        self.pending.borrow_mut().push(done);
    }
}

/// Records scripts as they are inserted; nothing loads until told to
#[derive(Default)]
pub struct RecordingScriptHost {
    pub inserted: RefCell<Vec<Node>>,
}

impl RecordingScriptHost {
    pub fn sources(&self) -> Vec<Option<String>> {
        self.inserted
            .borrow()
            .iter()
            .map(|script| script.get_attribute("src"))
            .collect()
    }

    /// Report `event` for the inserted script loading from `src`
    pub fn finish(&self, src: &str, event: ScriptEvent) -> bool {
        let script = self
            .inserted
            .borrow()
            .iter()
            .find(|script| script.get_attribute("src").as_deref() == Some(src))
            .cloned();
        script.is_some_and(|script| script.dispatch(event))
    }
}

impl ScriptHost for RecordingScriptHost {
    fn script_inserted(&self, script: &Node) {
        self.inserted.borrow_mut().push(script.clone());
    }
}

/// Loads every external script the moment it is inserted
#[derive(Default)]
pub struct EagerScriptHost {
    pub loaded: Cell<usize>,
}

impl ScriptHost for EagerScriptHost {
    fn script_inserted(&self, script: &Node) {
        if script.has_attribute("src") && script.dispatch(ScriptEvent::Load) {
            self.loaded.set(self.loaded.get() + 1);
        }
    }
}

#[derive(Default)]
pub struct CollectingReporter {
    pub errors: RefCell<Vec<AppshellError>>,
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, error: AppshellError) {
        self.errors.borrow_mut().push(error);
    }
}

/// A page with a cache, fake host and a counting application
pub struct Harness {
    pub page: Rc<Page>,
    pub cache: Option<Rc<SimulatedCache>>,
    pub timers: Rc<ManualTimers>,
    pub fetcher: Rc<StubFetcher>,
    pub scripts: Rc<RecordingScriptHost>,
    pub reporter: Rc<CollectingReporter>,
    pub boots: Rc<Cell<u32>>,
    pub booted_with: Rc<RefCell<Option<serde_json::Value>>>,
    pub bootloader: Bootloader,
}

impl Harness {
    /// `None` models a page without an application cache
    pub fn new(status: Option<CacheStatus>) -> Self {
        Self::with_config(status, BootConfig::default())
    }

    pub fn with_config(status: Option<CacheStatus>, config: BootConfig) -> Self {
        let document = Rc::new(parse_html(CURRENT));
        document.set_ready_state(ReadyState::Interactive);
        let scripts = Rc::new(RecordingScriptHost::default());
        document.set_script_host(scripts.clone());

        let cache = status.map(|status| Rc::new(SimulatedCache::new(status)));
        let page = Rc::new(Page::new(
            document,
            cache.clone().map(|cache| cache as Rc<dyn ApplicationCache>),
        ));

        let timers = Rc::new(ManualTimers::default());
        let fetcher = Rc::new(StubFetcher::default());
        let reporter = Rc::new(CollectingReporter::default());
        let boots = Rc::new(Cell::new(0));
        let booted_with = Rc::new(RefCell::new(None));

        let counter = boots.clone();
        let seen = booted_with.clone();
        let app = move |config: &serde_json::Value| {
            counter.set(counter.get() + 1);
            *seen.borrow_mut() = Some(config.clone());
        };
        let bootloader = Bootloader::new(
            config,
            timers.clone(),
            fetcher.clone(),
            BootTarget::new(Rc::new(app), serde_json::json!({ "rootElement": "#root" })),
        )
        .with_reporter(reporter.clone());

        Self {
            page,
            cache,
            timers,
            fetcher,
            scripts,
            reporter,
            boots,
            booted_with,
            bootloader,
        }
    }

    pub fn run(&self) -> BootRun {
        self.bootloader.run(&self.page)
    }

    pub fn cache(&self) -> &SimulatedCache {
        self.cache.as_deref().expect("harness has a cache")
    }

    pub fn boots(&self) -> u32 {
        self.boots.get()
    }

    pub fn error_count(&self) -> usize {
        self.reporter.errors.borrow().len()
    }

    /// Ids of the element children of the live body
    pub fn body_ids(&self) -> Vec<String> {
        self.page
            .document
            .body()
            .children()
            .iter()
            .filter_map(|child| child.get_attribute("id"))
            .collect()
    }

    /// Local names of the element children of the live head
    pub fn head_names(&self) -> Vec<String> {
        self.page
            .document
            .head()
            .children()
            .iter()
            .filter_map(|child| child.local_name().map(str::to_string))
            .collect()
    }

    pub fn title(&self) -> String {
        self.page
            .document
            .head()
            .children()
            .iter()
            .find(|child| child.is_element("title"))
            .map(|title| title.text_content())
            .unwrap_or_default()
    }
}
