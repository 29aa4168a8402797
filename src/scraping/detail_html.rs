use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::base;
use crate::models::{EventDetail, SocialMedia, SummaryBlock};

static HEADER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.ev_header").expect("detail header selector"));
static SOCIAL_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.ev_social > a").expect("detail social links"));
static SUMMARY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.ev_summary").expect("detail summary selector"));
static TITLE_IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img[alt]").expect("detail title image"));
static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("detail summary rows"));
static LABEL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("detail row label"));
static VALUE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("detail row value"));
static VALUE_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td a").expect("detail row link"));

#[derive(Debug, Clone, Copy)]
enum SocialField {
    Facebook,
    Twitter,
    Instagram,
    Website,
}

const SOCIAL_LABELS: [(&str, SocialField); 4] = [
    ("Facebook", SocialField::Facebook),
    ("Twitter", SocialField::Twitter),
    ("Instagram", SocialField::Instagram),
    ("Website", SocialField::Website),
];

#[derive(Debug, Clone, Copy)]
enum SummaryField {
    EntriesOpen,
    EntriesClose,
    EntriesSoFar,
    OrganizerName,
    OrganizerEmail,
    OrganizerWebsite,
}

/// Where a row keeps its value.
#[derive(Debug, Clone, Copy)]
enum ValueSource {
    CellText,
    LinkText,
}

const SUMMARY_LABELS: [(&str, SummaryField, ValueSource); 6] = [
    ("Entries Open", SummaryField::EntriesOpen, ValueSource::CellText),
    ("Entries Close", SummaryField::EntriesClose, ValueSource::CellText),
    ("Entries so Far", SummaryField::EntriesSoFar, ValueSource::CellText),
    ("Contact", SummaryField::OrganizerName, ValueSource::CellText),
    ("Email", SummaryField::OrganizerEmail, ValueSource::LinkText),
    ("Website", SummaryField::OrganizerWebsite, ValueSource::LinkText),
];

fn social_slot(social: &mut SocialMedia, field: SocialField) -> &mut String {
    match field {
        SocialField::Facebook => &mut social.facebook,
        SocialField::Twitter => &mut social.twitter,
        SocialField::Instagram => &mut social.instagram,
        SocialField::Website => &mut social.website,
    }
}

fn summary_slot(summary: &mut SummaryBlock, field: SummaryField) -> &mut String {
    match field {
        SummaryField::EntriesOpen => &mut summary.entries_open,
        SummaryField::EntriesClose => &mut summary.entries_close,
        SummaryField::EntriesSoFar => &mut summary.entries_so_far,
        SummaryField::OrganizerName => &mut summary.organizer.name,
        SummaryField::OrganizerEmail => &mut summary.organizer.email,
        SummaryField::OrganizerWebsite => &mut summary.organizer.website,
    }
}

/// Builds the full record for an event page.
///
/// The header and the summary are read independently; a page missing either
/// one still yields whatever the other provides.
pub fn event_detail(document: &Html) -> EventDetail {
    EventDetail::from_parts(scan_summary(document), scan_social(document))
}

/// Social links from the page header, keyed by each icon link's `title`.
pub fn scan_social(document: &Html) -> SocialMedia {
    let mut social = SocialMedia::default();
    for header in document.select(&HEADER_SELECTOR) {
        for link in header.select(&SOCIAL_LINK_SELECTOR) {
            let label = base::attr(&link, "title");
            if let Some((_, field)) = SOCIAL_LABELS.iter().find(|(name, _)| *name == label) {
                *social_slot(&mut social, *field) = base::attr(&link, "href");
            }
        }
    }
    social
}

/// Title, entry dates and organizer contact from the summary block.
pub fn scan_summary(document: &Html) -> SummaryBlock {
    let mut summary = SummaryBlock::default();
    for region in document.select(&SUMMARY_SELECTOR) {
        if let Some(title) = region
            .select(&TITLE_IMAGE_SELECTOR)
            .next()
            .and_then(|img| img.value().attr("alt"))
        {
            summary.title = base::clean_text(title);
        }

        for row in region.select(&ROW_SELECTOR) {
            let label = base::child_text(&row, &LABEL_SELECTOR);
            let Some((_, field, source)) = SUMMARY_LABELS
                .iter()
                .find(|(name, _, _)| *name == label)
            else {
                continue;
            };
            *summary_slot(&mut summary, *field) = row_value(&row, *source);
        }
    }
    summary
}

fn row_value(row: &ElementRef<'_>, source: ValueSource) -> String {
    match source {
        ValueSource::CellText => base::child_text(row, &VALUE_SELECTOR),
        ValueSource::LinkText => base::child_text(row, &VALUE_LINK_SELECTOR),
    }
}
