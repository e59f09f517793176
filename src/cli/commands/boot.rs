//! Boot command - run the bootloader against an entry document

use crate::boot::{BootRun, BootTarget, Bootloader, Page};
use crate::cache::{ApplicationCache, CacheStatus, SimulatedCache};
use crate::cli::args::BootArgs;
use crate::config::Config;
use crate::dom::{parse_document, ReadyState};
use crate::error::{AppshellError, AppshellResult};
use crate::host::{ChannelReporter, DeferredScriptHost, HttpFetcher, TokioTimers};
use crate::ui::{self, Step, UiContext};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::fs;
use tokio::sync::{mpsc, oneshot};
use tokio::task::LocalSet;
use tracing::{debug, warn};

/// What the simulated page ended up with
struct BootSummary {
    run: BootRun,
    document: String,
    busted: bool,
    app_config: serde_json::Value,
    errors: Vec<AppshellError>,
}

/// Execute the boot command
pub async fn execute(args: BootArgs, config: &Config) -> AppshellResult<()> {
    let entry = fs::read_to_string(&args.entry)
        .await
        .map_err(|e| AppshellError::io(format!("reading {}", args.entry.display()), e))?;

    let mut config = config.clone();
    if let Some(ms) = args.check_timeout_ms {
        config.boot.check_timeout_ms = ms;
    }
    if let Some(origin) = &args.origin {
        config.fetch.origin = origin.clone();
    }

    let summary = LocalSet::new()
        .run_until(simulate(&args, &config, &entry))
        .await?;
    debug!("Bootloader run: {:?}", summary.run);

    match &args.output {
        Some(path) => {
            fs::write(path, &summary.document)
                .await
                .map_err(|e| AppshellError::io(format!("writing {}", path.display()), e))?;

            let ctx = UiContext::detect();
            ui::intro(&ctx, "appshell boot");
            let status = if args.no_cache {
                "absent".to_string()
            } else {
                format!("{} ({})", args.status, args.status.code())
            };
            ui::key_value(&ctx, "Cache status", &status);
            ui::key_value(&ctx, "Run", &format!("{:?}", summary.run));
            ui::key_value(&ctx, "Cache busted", if summary.busted { "yes" } else { "no" });
            ui::key_value(&ctx, "App config", &summary.app_config.to_string());
            ui::step(&ctx, Step::Ok, &format!("Booted document written to {}", path.display()));
        }
        None => println!("{}", summary.document),
    }

    // Boot has already happened; errors are surfaced afterwards
    match summary.errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

async fn simulate(args: &BootArgs, config: &Config, entry: &str) -> AppshellResult<BootSummary> {
    let document = Rc::new(parse_document(entry));
    document.set_script_host(Rc::new(DeferredScriptHost));

    let cache = (!args.no_cache).then(|| Rc::new(SimulatedCache::new(args.status)));
    let page = Rc::new(Page::new(
        document.clone(),
        cache.clone().map(|cache| cache as Rc<dyn ApplicationCache>),
    ));

    let (booted_tx, booted_rx) = oneshot::channel();
    let booted_tx = RefCell::new(Some(booted_tx));
    let app = move |app_config: &serde_json::Value| {
        if let Some(tx) = booted_tx.borrow_mut().take() {
            let _ = tx.send(app_config.clone());
        }
    };

    let (error_tx, mut error_rx) = mpsc::unbounded_channel();
    let bootloader = Bootloader::new(
        config.boot.clone(),
        Rc::new(TokioTimers),
        Rc::new(HttpFetcher::new(config.fetch.clone())),
        BootTarget::new(Rc::new(app), config.app_config()?),
    )
    .with_reporter(Rc::new(ChannelReporter::new(error_tx)));

    let run = bootloader.run(&page);

    if let (Some(event), Some(cache)) = (args.event, cache) {
        if args.status != CacheStatus::Checking {
            warn!("--event {} only matters while the cache is checking", event);
        }
        let delay = Duration::from_millis(args.event_delay_ms);
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            cache.dispatch(event);
        });
    }

    // The parser finishes with the entry document on the next tick
    let ready = document.clone();
    tokio::task::spawn_local(async move {
        tokio::task::yield_now().await;
        ready.set_ready_state(ReadyState::Interactive);
    });

    let boot_timeout = Duration::from_secs(args.boot_timeout_secs);
    let app_config = tokio::time::timeout(boot_timeout, booted_rx)
        .await
        .map_err(|_| AppshellError::BootTimeout(boot_timeout))?
        .map_err(|_| AppshellError::Internal("application entry point dropped".to_string()))?;

    let mut errors = Vec::new();
    while let Ok(err) = error_rx.try_recv() {
        errors.push(err);
    }

    Ok(BootSummary {
        run,
        document: document.to_html(),
        busted: page.shadow_index().is_some(),
        app_config,
        errors,
    })
}
