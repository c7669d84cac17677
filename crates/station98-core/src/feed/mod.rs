//! Merged update/video feed across launch events.
//!
//! `merge_feed` flattens every event's updates and videos into one list
//! sorted newest first; `classify` decides how each item is emphasised.

pub mod classify;
pub mod merge;

pub use classify::{
    description_link, emphasis, split_by_emphasis, tone, DescriptionLink, Emphasis, FeedSections,
    UpdateTone, HIGHLIGHT_KEYWORDS,
};
pub use merge::{event_feed, merge_feed, FeedCategory, FeedItem, FeedSource};
