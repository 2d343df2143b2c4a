use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::{Analytics, Catalog, Event, Organization, User};

const NOT_RATED: &str = "Not rated";

/// Renders the activity report of `user`.
///
/// `events` is partitioned into the entries the user saved ("Upcoming") and
/// attended ("Past"); both lists follow the order of `events`.
pub fn user_report(user: &User, events: &[&Event], generated_at: DateTime<Utc>) -> String {
    UserReport {
        user,
        events,
        generated_at,
    }
    .to_string()
}

pub fn organizer_report(
    organization: &Organization,
    events: &[&Event],
    analytics: &Analytics,
    generated_at: DateTime<Utc>,
) -> String {
    OrganizerReport {
        organization,
        events,
        analytics,
        generated_at,
    }
    .to_string()
}

/// Share of `total` attendees in percent. Zero attendees yield `0.0`.
#[must_use]
pub fn popular_mood_share(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    count as f64 / total as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    User,
    Organizer,
}

impl ReportKind {
    #[must_use]
    pub fn filename(self, date: NaiveDate) -> String {
        let prefix = match self {
            ReportKind::User => "user-activity-report",
            ReportKind::Organizer => "organization-report",
        };

        format!("{prefix}-{}.txt", date.format("%Y-%m-%d"))
    }
}

/// Figures shown on the user dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub saved_events: usize,
    pub attended_events: usize,
    pub hours_enjoyed: usize,
    pub venues_visited: usize,
}

impl UserSummary {
    /// Counts only ids the catalog knows about. Every attended event counts as two hours.
    pub fn new(user: &User, catalog: &Catalog) -> Self {
        let attended = catalog.resolve(&user.attended_events);
        let venues = attended
            .iter()
            .map(|event| event.venue.as_str())
            .collect::<HashSet<_>>();

        UserSummary {
            saved_events: catalog.resolve(&user.saved_events).len(),
            attended_events: attended.len(),
            hours_enjoyed: attended.len() * 2,
            venues_visited: venues.len(),
        }
    }
}

struct UserReport<'a> {
    user: &'a User,
    events: &'a [&'a Event],
    generated_at: DateTime<Utc>,
}

impl fmt::Display for UserReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = self.user;
        let saved = self
            .events
            .iter()
            .filter(|event| user.saved_events.contains(&event.id))
            .collect::<Vec<_>>();
        let attended = self
            .events
            .iter()
            .filter(|event| user.attended_events.contains(&event.id))
            .collect::<Vec<_>>();

        writeln!(f, "User Activity Report")?;
        write_generated_at(f, self.generated_at)?;

        heading(f, "User Profile")?;
        writeln!(f, "Name: {}", user.name)?;
        writeln!(f, "Email: {}", user.email)?;
        if let Some(year) = user.member_since {
            writeln!(f, "Member Since: {year}")?;
        }
        writeln!(f, "Total Events Saved: {}", saved.len())?;
        writeln!(f, "Total Events Attended: {}", attended.len())?;

        heading(f, "Upcoming Events")?;
        if saved.is_empty() {
            writeln!(f, "None")?;
        }
        for (idx, event) in saved.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "• {}", event.title)?;
            writeln!(f, "  Date: {}", display_date(&event.date))?;
            writeln!(f, "  Time: {}", event.time)?;
            writeln!(f, "  Venue: {}", event.venue)?;
            writeln!(f, "  Category: {}", event.category)?;
        }

        heading(f, "Past Events")?;
        if attended.is_empty() {
            writeln!(f, "None")?;
        }
        for (idx, event) in attended.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "• {}", event.title)?;
            writeln!(f, "  Date: {}", display_date(&event.date))?;
            writeln!(f, "  Venue: {}", event.venue)?;
            writeln!(f, "  Rating: {}", Rating(event.rating))?;
        }

        heading(f, "Interests")?;
        let interests = user
            .interests
            .iter()
            .map(|interest| interest.as_str())
            .collect::<Vec<_>>();
        writeln!(f, "{}", interests.join(", "))
    }
}

struct OrganizerReport<'a> {
    organization: &'a Organization,
    events: &'a [&'a Event],
    analytics: &'a Analytics,
    generated_at: DateTime<Utc>,
}

impl fmt::Display for OrganizerReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let organization = self.organization;
        let analytics = self.analytics;

        writeln!(f, "Organization Performance Report")?;
        write_generated_at(f, self.generated_at)?;

        heading(f, "Organization Details")?;
        writeln!(f, "Name: {}", organization.name)?;
        writeln!(f, "Email: {}", organization.contact_email)?;
        writeln!(f, "Total Events: {}", self.events.len())?;
        writeln!(
            f,
            "Verified Status: {}",
            if organization.verified {
                "Verified"
            } else {
                "Pending"
            }
        )?;

        heading(f, "Event Analytics")?;
        writeln!(f, "Total Attendees: {}", analytics.total_attendees)?;
        writeln!(
            f,
            "Average Event Rating: {}/5.0",
            OneDecimal(analytics.average_rating)
        )?;

        heading(f, "Mood Impact")?;
        writeln!(f, "Positive Impact: {}%", analytics.mood_impact.positive)?;
        writeln!(f, "Neutral Impact: {}%", analytics.mood_impact.neutral)?;
        writeln!(f, "Negative Impact: {}%", analytics.mood_impact.negative)?;

        heading(f, "Popular Moods")?;
        if analytics.popular_moods.is_empty() {
            writeln!(f, "None")?;
        }
        for popular in &analytics.popular_moods {
            writeln!(
                f,
                "{}: {} attendees ({}%)",
                popular.mood,
                popular.count,
                OneDecimal(popular_mood_share(popular.count, analytics.total_attendees))
            )?;
        }

        heading(f, "Event Details")?;
        if self.events.is_empty() {
            writeln!(f, "None")?;
        }
        for (idx, event) in self.events.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "• {}", event.title)?;
            writeln!(f, "  Date: {}", display_date(&event.date))?;
            writeln!(f, "  Time: {}", event.time)?;
            writeln!(f, "  Venue: {}", event.venue)?;
            writeln!(f, "  Category: {}", event.category)?;
            writeln!(f, "  Rating: {}", Rating(event.rating))?;
            writeln!(f, "  Mood: {}", event.mood.name)?;
        }

        Ok(())
    }
}

struct Rating(Option<f32>);

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(rating) => write!(f, "{rating}"),
            None => f.write_str(NOT_RATED),
        }
    }
}

/// One decimal place, with ties rounded away from zero.
struct OneDecimal(f64);

impl fmt::Display for OneDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", (self.0 * 10.0).round() / 10.0)
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.chars().count()))
}

fn write_generated_at(f: &mut fmt::Formatter<'_>, at: DateTime<Utc>) -> fmt::Result {
    writeln!(f, "Generated on: {} UTC", at.format("%-m/%-d/%Y, %-I:%M:%S %p"))
}

/// `2025-07-15` becomes `July 15, 2025`; anything unparsable is shown as is.
fn display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}
