//! Data models for backend records.
//!
//! - `LaunchEvent`, `EventUpdate`, `EventVideo`: launches and their media
//! - `LaunchProvider`, `Mission`, `Pad`, `Program`: reference collections
//! - `Astronaut`, `Expedition`, `Spacewalk`: crewed spaceflight
//! - `Envelope`, `Record`: the query wrapper and the per-collection contract

pub mod astronaut;
pub mod event;
pub mod expedition;
pub mod mission;
pub mod pad;
pub mod program;
pub mod provider;
pub mod record;

pub use astronaut::Astronaut;
pub use event::{EventExpand, EventUpdate, EventVideo, LaunchEvent};
pub use expedition::{
    partition_expeditions, partition_spacewalks, Expedition, ExpeditionExpand, ExpeditionSections,
    Spacewalk, Station,
};
pub use mission::Mission;
pub use pad::Pad;
pub use program::Program;
pub use provider::LaunchProvider;
pub use record::{Envelope, Record, DEFAULT_PAGE_SIZE};
