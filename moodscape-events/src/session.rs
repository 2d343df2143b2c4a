use crate::{EventCategory, Mood, Role, User};

impl User {
    /// The signed-out user every session starts with.
    #[must_use]
    pub fn guest() -> Self {
        User {
            id: "1".into(),
            name: "Guest User".into(),
            email: String::new(),
            photo_url: None,
            interests: vec![EventCategory::Music, EventCategory::Art, EventCategory::Tech],
            saved_events: Vec::new(),
            attended_events: Vec::new(),
            current_mood: None,
            role: Role::User,
            organization_id: None,
            member_since: Some(2025),
        }
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.current_mood = Some(mood);
    }

    /// Returns `false` when the interest was already present.
    pub fn add_interest(&mut self, interest: EventCategory) -> bool {
        push_unique(&mut self.interests, interest)
    }

    pub fn remove_interest(&mut self, interest: EventCategory) -> bool {
        remove_all(&mut self.interests, &interest)
    }

    #[must_use]
    pub fn is_saved(&self, event_id: &str) -> bool {
        self.saved_events.iter().any(|id| id == event_id)
    }

    pub fn save_event(&mut self, event_id: &str) -> bool {
        push_unique(&mut self.saved_events, event_id.to_string())
    }

    pub fn unsave_event(&mut self, event_id: &str) -> bool {
        remove_all(&mut self.saved_events, &event_id.to_string())
    }

    /// Flips the saved state and returns the new one.
    pub fn toggle_saved(&mut self, event_id: &str) -> bool {
        if self.is_saved(event_id) {
            self.unsave_event(event_id);
            false
        } else {
            self.save_event(event_id);
            true
        }
    }

    pub fn mark_attended(&mut self, event_id: &str) -> bool {
        push_unique(&mut self.attended_events, event_id.to_string())
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }

    items.push(item);
    true
}

fn remove_all<T: PartialEq>(items: &mut Vec<T>, item: &T) -> bool {
    let before = items.len();
    items.retain(|existing| existing != item);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moods;

    #[test]
    fn guest_starts_with_default_interests() {
        let user = User::guest();
        assert_eq!(user.name, "Guest User");
        assert_eq!(
            user.interests,
            [EventCategory::Music, EventCategory::Art, EventCategory::Tech]
        );
        assert!(user.saved_events.is_empty());
    }

    #[test]
    fn interests_never_hold_duplicates() {
        let mut user = User::guest();
        assert!(!user.add_interest(EventCategory::Music));
        assert!(user.add_interest(EventCategory::Food));
        assert!(!user.add_interest(EventCategory::Food));
        assert_eq!(user.interests.len(), 4);

        assert!(user.remove_interest(EventCategory::Art));
        assert!(!user.remove_interest(EventCategory::Art));
        assert_eq!(
            user.interests,
            [EventCategory::Music, EventCategory::Tech, EventCategory::Food]
        );
    }

    #[test]
    fn saved_events_keep_insertion_order_without_duplicates() {
        let mut user = User::guest();
        user.save_event("3");
        user.save_event("1");
        user.save_event("3");
        assert_eq!(user.saved_events, ["3", "1"]);

        user.unsave_event("3");
        assert_eq!(user.saved_events, ["1"]);
    }

    #[test]
    fn toggle_saved_flips_state() {
        let mut user = User::guest();
        assert!(user.toggle_saved("5"));
        assert!(user.is_saved("5"));
        assert!(!user.toggle_saved("5"));
        assert!(!user.is_saved("5"));
    }

    #[test]
    fn attending_twice_records_once() {
        let mut user = User::guest();
        assert!(user.mark_attended("2"));
        assert!(!user.mark_attended("2"));
        assert_eq!(user.attended_events, ["2"]);
    }

    #[test]
    fn set_mood_replaces_previous_mood() {
        let mut user = User::guest();
        user.set_mood(moods::by_id("chill").unwrap().clone());
        user.set_mood(moods::by_id("focused").unwrap().clone());
        assert_eq!(user.current_mood.unwrap().id, "focused");
    }
}
