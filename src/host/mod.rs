//! Host environment abstraction
//!
//! The bootloader never touches timers, the network or the application
//! directly. Everything it needs from the page's environment comes through
//! these traits so the same state machine can run against:
//! - the tokio host (`appshell boot`), and
//! - deterministic fakes in tests.
//!
//! All callbacks are single-threaded (`!Send`), matching a page's event loop.

mod http;
mod tokio_host;

pub use http::HttpFetcher;
pub use tokio_host::{DeferredScriptHost, TokioTimers};

use crate::boot::LOG_TAG;
use crate::error::{AppshellError, AppshellResult};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

/// One-shot timer scheduling
pub trait Timers {
    /// Run `callback` once after `delay`; there is no way to cancel it
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>);
}

/// Completion callback for a shadow index request
pub type FetchCallback = Box<dyn FnOnce(AppshellResult<ShadowResponse>)>;

/// Fetches the shadow entry document
pub trait ShadowFetcher {
    /// GET `url` and hand the outcome to `done` exactly once
    ///
    /// Transport failures are `Err`; any HTTP status is `Ok`.
    fn get(&self, url: &str, done: FetchCallback);
}

/// Response to a shadow index request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowResponse {
    pub status: u16,
    pub body: String,
}

impl ShadowResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// The body if the request succeeded with HTTP 200
    pub fn into_html(self, url: &str) -> AppshellResult<String> {
        if self.status == 200 {
            Ok(self.body)
        } else {
            Err(AppshellError::ShadowStatus {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// The application's startup entry point
pub trait Application {
    fn create(&self, config: &serde_json::Value);
}

impl<F> Application for F
where
    F: Fn(&serde_json::Value),
{
    fn create(&self, config: &serde_json::Value) {
        self(config)
    }
}

/// Where errors raised after boot has been allowed end up
pub trait ErrorReporter {
    fn report(&self, error: AppshellError);
}

/// Reports errors to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, err: AppshellError) {
        error!("{} {}", LOG_TAG, err);
    }
}

/// Forwards errors to a channel
#[derive(Debug, Clone)]
pub struct ChannelReporter(UnboundedSender<AppshellError>);

impl ChannelReporter {
    pub fn new(sender: UnboundedSender<AppshellError>) -> Self {
        Self(sender)
    }
}

impl ErrorReporter for ChannelReporter {
    fn report(&self, err: AppshellError) {
        if let Err(unsent) = self.0.send(err) {
            error!("{} {}", LOG_TAG, unsent.0);
        }
    }
}
