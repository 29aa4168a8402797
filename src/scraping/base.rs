use scraper::{ElementRef, Selector};

pub fn clean_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of every match below `element`, concatenated in document order.
///
/// Text nodes are joined as-is, so inline markup like `19<sup>th</sup>`
/// stays `19th`. Empty when nothing matches.
pub fn child_text(element: &ElementRef<'_>, selector: &Selector) -> String {
    let raw: String = element
        .select(selector)
        .flat_map(|node| node.text())
        .collect();
    clean_text(&raw)
}

/// Attribute of the first match below `element`, or empty.
pub fn first_attr(element: &ElementRef<'_>, selector: &Selector, attr: &str) -> String {
    element
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

pub fn attr(element: &ElementRef<'_>, attr: &str) -> String {
    element
        .value()
        .attr(attr)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}
