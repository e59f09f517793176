//! Shadow index fetcher over HTTP

use super::{FetchCallback, ShadowFetcher, ShadowResponse};
use crate::config::FetchConfig;
use crate::error::{AppshellError, AppshellResult};
use tracing::debug;
use ureq::Agent;

/// Fetches the shadow index with ureq on tokio's blocking pool
#[derive(Clone)]
pub struct HttpFetcher {
    config: FetchConfig,
    agent: Agent,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .http_status_as_error(false)
            .build()
            .into();
        Self { config, agent }
    }

    /// Blocking GET of a root-relative path
    pub fn fetch_blocking(&self, path: &str) -> AppshellResult<ShadowResponse> {
        fetch(&self.agent, &self.config.resolve(path))
    }
}

fn fetch(agent: &Agent, url: &str) -> AppshellResult<ShadowResponse> {
    debug!("GET {}", url);
    let mut response = agent
        .get(url)
        .call()
        .map_err(|e| AppshellError::shadow_network(url, e))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| AppshellError::shadow_network(url, e))?;
    debug!("GET {} -> {} ({} bytes)", url, status, body.len());

    Ok(ShadowResponse { status, body })
}

impl ShadowFetcher for HttpFetcher {
    fn get(&self, path: &str, done: FetchCallback) {
        let agent = self.agent.clone();
        let url = self.config.resolve(path);
        tokio::task::spawn_local(async move {
            let request_url = url.clone();
            let result = tokio::task::spawn_blocking(move || fetch(&agent, &request_url))
                .await
                .unwrap_or_else(|e| Err(AppshellError::shadow_network(url, e)));
            done(result);
        });
    }
}
