mod catalog;
mod error;
pub mod fixtures;
pub mod location;
pub mod moods;
pub mod report;
mod session;
mod structs;

#[cfg(feature = "ics")]
mod ics;

pub use catalog::{Catalog, EventFilter, MAX_RECOMMENDATIONS};
pub use error::{Error, Result};
#[cfg(feature = "ics")]
pub use self::ics::to_calendar;
pub use structs::{
    Analytics, DateCount, Event, EventCategory, Location, Mood, MoodCount, MoodImpact,
    Organization, Role, SocialLinks, User,
};
