//! Title and description classification for feed display.

use reqwest::Url;

use super::FeedItem;

/// Title keywords that mark an update as status news worth highlighting.
pub const HIGHLIGHT_KEYWORDS: [&str; 7] = [
    "scrubbed",
    "success",
    "go for",
    "rescheduled",
    "delayed",
    "on hold",
    "tweaked",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Highlighted,
    News,
}

/// Highlighted when the title contains any keyword, ignoring case.
pub fn emphasis(title: &str) -> Emphasis {
    let lower = title.to_lowercase();
    if HIGHLIGHT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Emphasis::Highlighted
    } else {
        Emphasis::News
    }
}

/// Status colour of an update title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTone {
    Scrubbed,
    Positive,
    Caution,
    Neutral,
}

/// First match wins: scrubbed, then success/go, then schedule changes.
pub fn tone(title: &str) -> UpdateTone {
    let lower = title.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    if has(&["scrubbed"]) {
        UpdateTone::Scrubbed
    } else if has(&["success", "go for"]) {
        UpdateTone::Positive
    } else if has(&["rescheduled", "delayed", "on hold", "tweaked"]) {
        UpdateTone::Caution
    } else {
        UpdateTone::Neutral
    }
}

/// Feed split into highlighted and news items, each in feed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSections {
    pub highlighted: Vec<FeedItem>,
    pub news: Vec<FeedItem>,
}

pub fn split_by_emphasis(items: &[FeedItem]) -> FeedSections {
    let (highlighted, news) = items
        .iter()
        .cloned()
        .partition(|item| emphasis(&item.title) == Emphasis::Highlighted);
    FeedSections { highlighted, news }
}

/// What an update description points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionLink {
    /// A post on x.com / twitter.com
    Post(Url),
    /// Any other web link
    Article(Url),
    Text,
}

pub fn description_link(description: &str) -> DescriptionLink {
    let url = match Url::parse(description.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => return DescriptionLink::Text,
    };
    let is_social = url
        .host_str()
        .is_some_and(|h| h.contains("x.com") || h.contains("twitter.com"));
    if is_social && url.path().contains("/status/") {
        DescriptionLink::Post(url)
    } else {
        DescriptionLink::Article(url)
    }
}
