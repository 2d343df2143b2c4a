use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::{Error, Event, EventCategory, Result};

/// Upper bound on the number of recommended events.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// The fixed, insertion-ordered collection of every known event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    events: Vec<Event>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and ratings outside `[0, 5]`.
    pub fn new(events: Vec<Event>) -> Result<Self> {
        let mut seen = HashSet::new();

        for event in &events {
            if !seen.insert(event.id.as_str()) {
                return Err(Error::DuplicateEvent(event.id.clone()));
            }

            if let Some(rating) = event.rating {
                if !(0.0..=5.0).contains(&rating) {
                    return Err(Error::InvalidRating {
                        id: event.id.clone(),
                        rating,
                    });
                }
            }
        }

        Ok(Catalog { events })
    }

    pub fn from_json<S: AsRef<str>>(s: S) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(s.as_ref())?;
        Self::new(events)
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn by_category(&self, category: EventCategory) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| event.category == category)
            .collect()
    }

    pub fn by_mood(&self, mood_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| event.mood.id == mood_id)
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Looks up each id in turn, skipping ids the catalog does not know.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Event> {
        ids.iter().filter_map(|id| self.by_id(id.as_ref())).collect()
    }

    /// Mood matches first, then events in one of `interests`, deduplicated by
    /// event id in first-seen order and capped at [`MAX_RECOMMENDATIONS`].
    pub fn recommend(&self, mood_id: &str, interests: &[EventCategory]) -> Vec<&Event> {
        let mut results = self.by_mood(mood_id);

        if !interests.is_empty() {
            let mut seen = results
                .iter()
                .copied()
                .map(|event| event.id.as_str())
                .collect::<HashSet<_>>();

            for event in &self.events {
                if interests.contains(&event.category) && seen.insert(event.id.as_str()) {
                    results.push(event);
                }
            }
        }

        results.truncate(MAX_RECOMMENDATIONS);
        results
    }
}

/// Independently selected discovery filters, applied conjunctively.
///
/// An empty value, as sent by a form with nothing selected, leaves that
/// filter unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<EventCategory>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub mood: Option<String>,
    /// Matched by exact string equality against `Event::date`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<String>,
}

fn empty_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

impl EventFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.mood.is_none() && self.date.is_none()
    }

    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Event> {
        let mut results = match self.category {
            Some(category) => catalog.by_category(category),
            None => catalog.events.iter().collect(),
        };

        // Narrows whatever the category step left instead of requerying the catalog.
        if let Some(mood) = &self.mood {
            results.retain(|event| &event.mood.id == mood);
        }

        if let Some(date) = &self.date {
            results.retain(|event| &event.date == date);
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn ids<'a>(events: &[&'a Event]) -> Vec<&'a str> {
        events.iter().map(|event| event.id.as_str()).collect()
    }

    #[test]
    fn music_events_keep_catalog_order() {
        let catalog = fixtures::sample_catalog();
        assert_eq!(ids(&catalog.by_category(EventCategory::Music)), ["1", "8"]);
    }

    #[test]
    fn empty_category_yields_nothing() {
        let catalog = fixtures::sample_catalog();
        assert!(catalog.by_category(EventCategory::Sports).is_empty());
        assert!(catalog.by_mood("melancholic").is_empty());
    }

    #[test]
    fn unknown_id_is_absent() {
        let catalog = fixtures::sample_catalog();
        assert!(catalog.by_id("42").is_none());
        assert_eq!(catalog.by_id("4").unwrap().title, "Sunset Yoga Retreat");
    }

    #[test]
    fn resolve_follows_id_order_and_skips_unknown() {
        let catalog = fixtures::sample_catalog();
        let events = catalog.resolve(&["8", "missing", "2"]);
        assert_eq!(ids(&events), ["8", "2"]);
    }

    #[test]
    fn recommend_puts_mood_matches_before_interests() {
        let catalog = fixtures::sample_catalog();
        let events = catalog.recommend("energetic", &[EventCategory::Tech]);
        assert_eq!(ids(&events), ["1", "3"]);
    }

    #[test]
    fn recommend_without_interests_is_mood_only() {
        let catalog = fixtures::sample_catalog();
        let events = catalog.recommend("romantic", &[]);
        assert_eq!(ids(&events), ["8"]);
    }

    #[test]
    fn recommend_deduplicates_by_id_and_caps_results() {
        let catalog = fixtures::sample_catalog();
        let events = catalog.recommend(
            "energetic",
            &[EventCategory::Music, EventCategory::Art, EventCategory::Tech],
        );

        // Event 1 matches both the mood and the music interest but appears once.
        assert_eq!(ids(&events), ["1", "2", "3", "7"]);
    }

    #[test]
    fn mood_filter_composes_with_category() {
        let catalog = fixtures::sample_catalog();
        let filter = EventFilter {
            category: Some(EventCategory::Music),
            mood: Some("romantic".into()),
            date: None,
        };
        assert_eq!(ids(&filter.apply(&catalog)), ["8"]);

        let filter = EventFilter {
            category: Some(EventCategory::Art),
            mood: Some("energetic".into()),
            date: None,
        };
        assert!(filter.apply(&catalog).is_empty());
    }

    #[test]
    fn date_filter_uses_exact_equality() {
        let catalog = fixtures::sample_catalog();
        let filter = EventFilter {
            date: Some("2025-07-15".into()),
            ..EventFilter::default()
        };
        assert_eq!(ids(&filter.apply(&catalog)), ["1"]);

        let filter = EventFilter {
            date: Some("2025-07".into()),
            ..EventFilter::default()
        };
        assert!(filter.apply(&catalog).is_empty());
    }

    #[test]
    fn empty_filter_returns_whole_catalog() {
        let catalog = fixtures::sample_catalog();
        let filter = EventFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&catalog).len(), catalog.len());
        assert_eq!(
            ids(&filter.apply(&catalog)),
            ["1", "2", "3", "4", "5", "6", "7", "8"]
        );
    }

    #[test]
    fn blank_filter_values_are_unset() {
        let filter: EventFilter =
            serde_json::from_str(r#"{"category": "", "mood": "", "date": ""}"#).unwrap();
        assert!(filter.is_empty());

        let filter: EventFilter =
            serde_json::from_str(r#"{"category": "music", "mood": ""}"#).unwrap();
        assert_eq!(filter.category, Some(EventCategory::Music));
        assert_eq!(filter.mood, None);

        assert!(serde_json::from_str::<EventFilter>(r#"{"category": "opera"}"#).is_err());
    }

    #[test]
    fn recommend_caps_mood_matches_before_interests() {
        let template = fixtures::sample_catalog().events()[0].clone();
        let mut events = Vec::new();
        for id in ["a", "b", "c", "d", "e", "f"] {
            let mut event = template.clone();
            event.id = id.into();
            event.category = EventCategory::Art;
            events.push(event);
        }
        for id in ["t1", "t2"] {
            let mut event = template.clone();
            event.id = id.into();
            event.category = EventCategory::Tech;
            event.mood = crate::moods::by_id("focused").unwrap().clone();
            events.push(event);
        }
        let catalog = Catalog::new(events).unwrap();

        let mood_only = catalog.recommend("energetic", &[]);
        let by_mood = catalog.by_mood("energetic");
        assert_eq!(by_mood.len(), 6);
        assert_eq!(mood_only, &by_mood[..MAX_RECOMMENDATIONS]);

        let events = catalog.recommend("energetic", &[EventCategory::Tech]);
        assert_eq!(ids(&events), ["a", "b", "c", "d"]);
        assert!(events.iter().all(|event| event.category != EventCategory::Tech));
    }

    #[test]
    fn malformed_dates_do_not_break_filtering() {
        let mut events = fixtures::sample_catalog().events().to_vec();
        events[0].date = "someday".into();
        let catalog = Catalog::new(events).unwrap();

        let filter = EventFilter {
            date: Some("someday".into()),
            ..EventFilter::default()
        };
        assert_eq!(ids(&filter.apply(&catalog)), ["1"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut events = fixtures::sample_catalog().events().to_vec();
        events.push(events[0].clone());
        assert!(matches!(
            Catalog::new(events),
            Err(Error::DuplicateEvent(id)) if id == "1"
        ));
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let mut events = fixtures::sample_catalog().events().to_vec();
        events[2].rating = Some(5.5);
        assert!(matches!(
            Catalog::new(events),
            Err(Error::InvalidRating { id, .. }) if id == "3"
        ));
    }

    #[test]
    fn malformed_catalog_json_is_an_error() {
        assert!(matches!(Catalog::from_json("[{]"), Err(Error::Json(_))));
    }
}
