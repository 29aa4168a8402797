use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://www.sientries.co.uk/";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 13_5_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/13.1.1 Mobile/15E148 Safari/604.1";
const DEFAULT_ALLOWED_DOMAINS: &str = "www.sientries.co.uk,sientries.co.uk";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

const LISTING_PATH: &str = "index.php?page=L";
const EVENT_PATH: &str = "event.php";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("cannot build {path} from {base}: {reason}")]
    InvalidPath {
        base: String,
        path: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub allowed_domains: Vec<String>,
    pub timeout: Duration,
    pub cache: bool,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allowed_domains: split_domains(DEFAULT_ALLOWED_DOMAINS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache: false,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("SIENTRIES_BASE_URL").unwrap_or(defaults.base_url);
        let user_agent = lookup("SIENTRIES_USER_AGENT").unwrap_or(defaults.user_agent);
        let allowed_domains = lookup("SIENTRIES_ALLOWED_DOMAINS")
            .map(|raw| split_domains(&raw))
            .filter(|domains| !domains.is_empty())
            .unwrap_or(defaults.allowed_domains);
        let timeout = lookup("SIENTRIES_TIMEOUT_SECS")
            .and_then(|raw| parse_or_warn::<u64>("SIENTRIES_TIMEOUT_SECS", &raw))
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let cache = lookup("SIENTRIES_CACHE")
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or(defaults.cache);
        let output = match lookup("SIENTRIES_OUTPUT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                warn!(value = other, "unknown SIENTRIES_OUTPUT, using text");
                OutputFormat::Text
            }
        };

        Self {
            base_url,
            user_agent,
            allowed_domains,
            timeout,
            cache,
            output,
        }
    }

    pub fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: err.to_string(),
        })
    }

    fn join(&self, path: &str) -> Result<Url, ConfigError> {
        self.base()?
            .join(path)
            .map_err(|err| ConfigError::InvalidPath {
                base: self.base_url.clone(),
                path: path.to_string(),
                reason: err.to_string(),
            })
    }

    /// The events index page.
    pub fn listing_url(&self) -> Result<Url, ConfigError> {
        self.join(LISTING_PATH)
    }

    /// The page of a single event.
    pub fn event_url(&self, event_id: &str) -> Result<Url, ConfigError> {
        let mut url = self.join(EVENT_PATH)?;
        url.query_pairs_mut().append_pair("event_id", event_id);
        Ok(url)
    }
}

fn split_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|domain| domain.trim().to_ascii_lowercase())
        .filter(|domain| !domain.is_empty())
        .collect()
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = raw, "ignoring unparsable setting");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        other => {
            warn!(value = other, "ignoring unparsable SIENTRIES_CACHE");
            None
        }
    }
}
