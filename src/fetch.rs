use std::collections::HashMap;
use std::sync::Mutex;

use reqwest::blocking::Client;
use reqwest::Url;
use scraper::Html;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("domain not allowed: {0}")]
    DomainNotAllowed(String),
    #[error("http client error: {0}")]
    Client(String),
    #[error("request failed for {url}: {reason}")]
    Http { url: String, reason: String },
    #[error("non-success status {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("unable to read response body for {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Source of HTML pages.
pub trait Fetcher {
    fn fetch_html(&self, url: &str) -> Result<String, FetchError>;

    fn fetch_document(&self, url: &str) -> Result<Html, FetchError> {
        let body = self.fetch_html(url)?;
        Ok(Html::parse_document(&body))
    }
}

/// Blocking HTTP fetcher restricted to a fixed set of hosts.
pub struct HttpFetcher {
    client: Client,
    allowed_domains: Vec<String>,
    cache: Option<Mutex<HashMap<String, String>>>,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| FetchError::Client(err.to_string()))?;

        Ok(Self {
            client,
            allowed_domains: config.allowed_domains.clone(),
            cache: config.cache.then(|| Mutex::new(HashMap::new())),
        })
    }

    fn check_allowed(&self, url: &str) -> Result<Url, FetchError> {
        let parsed = Url::parse(url).map_err(|err| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        let host = parsed
            .host_str()
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| FetchError::InvalidUrl {
                url: url.to_string(),
                reason: "missing host".to_string(),
            })?;
        if !self.allowed_domains.iter().any(|domain| *domain == host) {
            return Err(FetchError::DomainNotAllowed(host));
        }
        Ok(parsed)
    }

    fn cached(&self, url: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard.get(url).cloned()
    }

    fn remember(&self, url: &str, body: &str) {
        if let Some(cache) = self.cache.as_ref() {
            if let Ok(mut guard) = cache.lock() {
                guard.insert(url.to_string(), body.to_string());
            }
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let parsed = self.check_allowed(url)?;

        if let Some(body) = self.cached(url) {
            debug!(url, "serving page from cache");
            return Ok(body);
        }

        debug!(url, "fetching page");
        let response = self
            .client
            .get(parsed)
            .send()
            .map_err(|err| FetchError::Http {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().map_err(|err| FetchError::Body {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        debug!(url, bytes = body.len(), "fetched page");

        self.remember(url, &body);
        Ok(body)
    }
}
