use once_cell::sync::Lazy;
use reqwest::Url;
use thiserror::Error;

/// Card links are relative to the site root.
static SITE_ROOT: Lazy<Url> =
    Lazy::new(|| Url::parse("https://www.sientries.co.uk/").expect("site root url"));

const EVENT_ID_KEY: &str = "event_id";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventIdError {
    #[error("parsing event address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("parsing query {0}")]
    InvalidQuery(String),
    #[error("missing event_id")]
    MissingEventId,
}

/// Pulls the `event_id` query value out of a card link.
///
/// Links in the listing markup escape `&` as `&amp;`; those are normalized
/// before the address is parsed. Only the first `event_id` pair counts, so
/// trailing parameters and keys appearing inside other values do not leak
/// into the result.
pub fn parse_event_id(raw: &str) -> Result<String, EventIdError> {
    let address = raw.trim().replace("&amp;", "&");
    let url = Url::options()
        .base_url(Some(&*SITE_ROOT))
        .parse(&address)
        .map_err(|err| EventIdError::InvalidAddress {
            address: address.clone(),
            reason: err.to_string(),
        })?;

    let query = url.query().unwrap_or_default();
    validate_query(query)?;

    url.query_pairs()
        .find(|(key, _)| key == EVENT_ID_KEY)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or(EventIdError::MissingEventId)
}

// form_urlencoded decodes lossily; reject what a strict query parser would.
fn validate_query(query: &str) -> Result<(), EventIdError> {
    let invalid = || EventIdError::InvalidQuery(query.to_string());
    if query.contains(';') {
        return Err(invalid());
    }
    let bytes = query.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let escape = bytes.get(idx + 1..idx + 3).ok_or_else(invalid)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return Err(invalid());
            }
            idx += 3;
        } else {
            idx += 1;
        }
    }
    Ok(())
}
