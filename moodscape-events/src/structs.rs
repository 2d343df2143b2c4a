use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Music,
    Art,
    Sports,
    Food,
    Tech,
    Wellness,
    Outdoor,
    Family,
}

impl EventCategory {
    pub const ALL: [EventCategory; 8] = [
        EventCategory::Music,
        EventCategory::Art,
        EventCategory::Sports,
        EventCategory::Food,
        EventCategory::Tech,
        EventCategory::Wellness,
        EventCategory::Outdoor,
        EventCategory::Family,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Music => "music",
            EventCategory::Art => "art",
            EventCategory::Sports => "sports",
            EventCategory::Food => "food",
            EventCategory::Tech => "tech",
            EventCategory::Wellness => "wellness",
            EventCategory::Outdoor => "outdoor",
            EventCategory::Family => "family",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    /// ISO calendar date, kept verbatim so filtering never depends on parsing.
    pub date: String,
    /// Local time of day as `HH:MM`.
    pub time: String,
    pub venue: String,
    pub address: String,
    pub image_url: String,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Organizer,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub interests: Vec<EventCategory>,
    #[serde(default)]
    pub saved_events: Vec<String>,
    #[serde(default)]
    pub attended_events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_mood: Option<Mood>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Year the account was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_since: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub verified: bool,
    pub created_at: String,
    #[serde(default)]
    pub members: Vec<String>,
    /// Ids of the events this organization owns.
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodImpact {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    pub date: String,
    pub count: u64,
}

/// Precomputed figures supplied by the caller; nothing here is derived from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_attendees: u64,
    pub average_rating: f64,
    pub mood_impact: MoodImpact,
    #[serde(default)]
    pub popular_moods: Vec<MoodCount>,
    #[serde(default)]
    pub attendance_by_date: Vec<DateCount>,
}
