use std::fmt;

use serde::{Deserialize, Serialize};

/// One card from the events index page.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventSummary {
    pub id: String, // empty when the card link carries no usable event_id
    pub date: String,
    pub event_type: String,
    pub title: String,
    pub status: String,
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.id, self.date, self.event_type, self.title, self.status
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Organizer {
    pub name: String,
    pub email: String,
    pub website: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SocialMedia {
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub website: String,
}

/// Everything the event page says about a single event.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventDetail {
    pub title: String,
    pub entries_open: String,
    pub entries_close: String,
    pub entries_so_far: String,
    pub organizer: Organizer,
    pub social_media: SocialMedia,
}

/// Fields read from the summary region of an event page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SummaryBlock {
    pub title: String,
    pub entries_open: String,
    pub entries_close: String,
    pub entries_so_far: String,
    pub organizer: Organizer,
}

impl EventDetail {
    pub fn from_parts(summary: SummaryBlock, social_media: SocialMedia) -> Self {
        Self {
            title: summary.title,
            entries_open: summary.entries_open,
            entries_close: summary.entries_close,
            entries_so_far: summary.entries_so_far,
            organizer: summary.organizer,
            social_media,
        }
    }
}
