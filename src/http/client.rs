//! Page requests against the feed host
//!
//! Every request is a GET whose JSON body is decoded into a page type.
//! Transient failures are retried with the configured backoff; a
//! `Retry-After` header from the host wins over the backoff.

use super::rate_limit::RequestPacer;
use crate::config::HttpConfig;
use crate::error::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP client bound to one feed host
pub struct HttpClient {
    client: Client,
    base_url: Url,
    settings: HttpConfig,
    pacer: Option<RequestPacer>,
}

impl HttpClient {
    /// Create a client for `base_url`; page paths are resolved below it
    pub fn new(base_url: &str, settings: &HttpConfig) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let dir = format!("{}/", base_url.path());
            base_url.set_path(&dir);
        }

        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("feed-cursor/{}", crate::VERSION));
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            settings: settings.clone(),
            pacer: settings.rate_limit.as_ref().map(RequestPacer::new),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of `path` with `query` appended
    pub fn page_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.page_url(path, query)?;
        let body = self.send_with_retries(&url).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| Error::decode(format!("{url}: {e}")))
    }

    /// Delay before the retry following failed attempt `attempt`
    pub(crate) fn retry_delay(&self, attempt: u32) -> Duration {
        self.settings.retry_backoff.delay(attempt)
    }

    async fn send_with_retries(&self, url: &Url) -> Result<Response> {
        let attempts = self.settings.max_retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            if let Some(pacer) = &self.pacer {
                pacer.ready().await;
            }

            let (error, retry_after) = match self.client.get(url.clone()).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(%url, attempt = attempt + 1, "Feed host answered");
                    return Ok(response);
                }
                Ok(response) => {
                    let status = response.status().as_u16();
                    let retry_after = retry_after_header(&response);
                    let body = response.text().await.unwrap_or_default();
                    (Error::http_status(status, body), retry_after)
                }
                Err(e) if e.is_timeout() => (
                    Error::Timeout {
                        timeout_ms: self.settings.timeout_seconds * 1000,
                    },
                    None,
                ),
                Err(e) => (Error::Http(e), None),
            };

            attempt += 1;
            if attempt >= attempts || !error.is_retryable() {
                return Err(error);
            }

            let delay = retry_after.unwrap_or_else(|| self.retry_delay(attempt - 1));
            warn!(%url, attempt, attempts, ?delay, %error, "Feed request failed, retrying");
            tokio::time::sleep(delay).await;
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// `Retry-After` in whole seconds; HTTP dates are ignored
fn retry_after_header(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
        .map(Duration::from_secs)
}
