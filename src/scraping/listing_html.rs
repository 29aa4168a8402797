use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use super::base;
use super::event_id::parse_event_id;
use crate::models::EventSummary;

static CARD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.eti_wrap").expect("listing card selector"));
static TITLE_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.eti_title > a").expect("listing title link"));
static DAY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.eti_date > .eti_day").expect("listing day"));
static NUM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.eti_date > .eti_num").expect("listing day number"));
static MONTH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.eti_date > .eti_month").expect("listing month"));
static TYPE_ICON_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.eti_type > img").expect("listing type icon"));
static STATUS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.eti_status > a > div.eti_button > span").expect("listing status label")
});

/// Maps every event card on the index page to a summary, in page order.
pub fn list_events(document: &Html) -> Vec<EventSummary> {
    document
        .select(&CARD_SELECTOR)
        .map(|card| {
            let href = base::first_attr(&card, &TITLE_LINK_SELECTOR, "href");
            let id = parse_event_id(&href).unwrap_or_else(|err| {
                debug!(href = %href, error = %err, "card without event id");
                String::new()
            });

            let date = format!(
                "{} {} {}",
                base::child_text(&card, &DAY_SELECTOR),
                base::child_text(&card, &NUM_SELECTOR),
                base::child_text(&card, &MONTH_SELECTOR),
            );

            EventSummary {
                id,
                date,
                event_type: base::first_attr(&card, &TYPE_ICON_SELECTOR, "title"),
                title: base::child_text(&card, &TITLE_LINK_SELECTOR),
                status: base::child_text(&card, &STATUS_SELECTOR),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r##"
    <html><body>
    <div id="eti_list">
        <div class="eti_wrap">
            <div class="eti_date">
                <div class="eti_day">Sat</div>
                <div class="eti_num">11</div>
                <div class="eti_month">Dec</div>
            </div>
            <div class="eti_type"><img src="images/fell.png" title="Fell Race"></div>
            <div class="eti_title">
                <a href="index.php?page=E&amp;event_id=8957">Bollihope Carrs Fell Race</a>
            </div>
            <div class="eti_status">
                <a href="index.php?page=E&amp;event_id=8957"><div class="eti_button"><span>Open</span></div></a>
            </div>
        </div>
        <div class="eti_wrap">
            <div class="eti_date">
                <div class="eti_day">Sun</div>
                <div class="eti_num">12</div>
                <div class="eti_month">Dec</div>
            </div>
            <div class="eti_type"><img src="images/road.png" title="Road Race"></div>
            <div class="eti_title">
                <a href="index.php?page=E&amp;event_id=9012">Christmas
                    Cracker 10k</a>
            </div>
        </div>
        <div class="eti_wrap">
            <div class="eti_date">
                <div class="eti_day">Sat</div>
                <div class="eti_num">1</div>
                <div class="eti_month">Jan</div>
            </div>
            <div class="eti_type"><img src="images/trail.png" title="Trail Race"></div>
            <div class="eti_title"><a href="index.php?page=L">New Year Trail</a></div>
            <div class="eti_status">
                <a href="#"><div class="eti_button"><span> Closed </span></div></a>
            </div>
        </div>
    </div>
    </body></html>
    "##;

    #[test]
    fn parses_cards_in_document_order() {
        let document = Html::parse_document(SAMPLE_HTML);
        let events = list_events(&document);
        assert_eq!(events.len(), 3);

        assert_eq!(
            events[0],
            EventSummary {
                id: "8957".to_string(),
                date: "Sat 11 Dec".to_string(),
                event_type: "Fell Race".to_string(),
                title: "Bollihope Carrs Fell Race".to_string(),
                status: "Open".to_string(),
            }
        );
        assert_eq!(events[1].title, "Christmas Cracker 10k");
        assert_eq!(events[2].title, "New Year Trail");
    }

    #[test]
    fn missing_status_leaves_other_cards_intact() {
        let document = Html::parse_document(SAMPLE_HTML);
        let events = list_events(&document);

        assert_eq!(events[1].status, "");
        assert_eq!(events[1].id, "9012");
        assert_eq!(events[1].date, "Sun 12 Dec");
        assert_eq!(events[2].status, "Closed");
    }

    #[test]
    fn card_without_event_id_gets_empty_id() {
        let document = Html::parse_document(SAMPLE_HTML);
        let events = list_events(&document);

        assert_eq!(events[2].id, "");
        assert_eq!(events[2].event_type, "Trail Race");
    }

    #[test]
    fn page_without_cards_is_empty() {
        let document = Html::parse_document("<html><body><p>No events</p></body></html>");
        assert!(list_events(&document).is_empty());
    }

    #[test]
    fn bare_card_yields_empty_fields() {
        let document = Html::parse_document(r#"<div class="eti_wrap"></div>"#);
        let events = list_events(&document);
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            EventSummary {
                date: "  ".to_string(),
                ..EventSummary::default()
            }
        );
    }

    #[test]
    fn inline_markup_and_split_labels_are_joined() {
        let document = Html::parse_document(
            r##"<div class="eti_wrap">
                <div class="eti_title"><a href="index.php?page=E&amp;event_id=77">Tour de <b>Helvellyn</b>, 2021</a></div>
                <div class="eti_status"><a href="#"><div class="eti_button"><span>Op</span><span>en</span></div></a></div>
            </div>"##,
        );
        let events = list_events(&document);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Tour de Helvellyn, 2021");
        assert_eq!(events[0].status, "Open");
        assert_eq!(events[0].id, "77");
    }

    #[test]
    fn repeated_extraction_is_identical() {
        let document = Html::parse_document(SAMPLE_HTML);
        assert_eq!(list_events(&document), list_events(&document));
    }
}
