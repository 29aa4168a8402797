pub mod config;
pub mod fetch;
pub mod models;
pub mod scraping;

use std::io::{self, Write};

use anyhow::{Context, Result};

pub use config::{Config, ConfigError, OutputFormat};
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use models::{EventDetail, EventSummary, Organizer, SocialMedia, SummaryBlock};
pub use scraping::{
    collect_event_detail, collect_events, event_detail, list_events, parse_event_id,
    EventIdError,
};

/// Current SiEntries listing, using settings from the environment.
pub fn get_events() -> Result<Vec<EventSummary>> {
    let config = Config::from_env();
    let fetcher = HttpFetcher::new(&config).context("building http client")?;
    let url = config.listing_url()?;
    collect_events(&fetcher, url.as_str())
        .with_context(|| format!("collecting events from {url}"))
}

/// Detail page of one event, using settings from the environment.
pub fn get_event_detail(event_id: &str) -> Result<EventDetail> {
    let config = Config::from_env();
    let fetcher = HttpFetcher::new(&config).context("building http client")?;
    let url = config.event_url(event_id)?;
    collect_event_detail(&fetcher, url.as_str())
        .with_context(|| format!("collecting event {event_id} from {url}"))
}

/// Prints the listing to stdout, one event per line.
pub fn run_cli() -> Result<()> {
    let config = Config::from_env();
    let fetcher = HttpFetcher::new(&config).context("building http client")?;
    let url = config.listing_url()?;
    let events = collect_events(&fetcher, url.as_str())
        .with_context(|| format!("collecting events from {url}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_events(&mut out, &events, config.output)?;
    out.flush().context("flushing stdout")?;
    Ok(())
}

pub fn write_events<W: Write>(
    out: &mut W,
    events: &[EventSummary],
    format: OutputFormat,
) -> Result<()> {
    for event in events {
        match format {
            OutputFormat::Text => writeln!(out, "{event}")?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, event).context("encoding event")?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
