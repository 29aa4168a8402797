pub mod base;
pub mod detail_html;
pub mod event_id;
pub mod listing_html;

use tracing::info;

use crate::fetch::{FetchError, Fetcher};
use crate::models::{EventDetail, EventSummary};

pub use detail_html::{event_detail, scan_social, scan_summary};
pub use event_id::{parse_event_id, EventIdError};
pub use listing_html::list_events;

/// Fetches the events index at `url` and maps its cards.
pub fn collect_events<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Result<Vec<EventSummary>, FetchError> {
    let document = fetcher.fetch_document(url)?;
    let events = list_events(&document);
    info!(url, count = events.len(), "collected events");
    Ok(events)
}

/// Fetches a single event page at `url` and maps it.
pub fn collect_event_detail<F: Fetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Result<EventDetail, FetchError> {
    let document = fetcher.fetch_document(url)?;
    let detail = event_detail(&document);
    info!(url, title = %detail.title, "collected event detail");
    Ok(detail)
}
