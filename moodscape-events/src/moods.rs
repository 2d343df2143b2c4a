use once_cell::sync::Lazy;

use crate::Mood;

static MOODS: Lazy<Vec<Mood>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../data/moods.json")).expect("bundled moods.json is valid")
});

const TRENDING: [&str; 3] = ["energetic", "social", "adventurous"];

/// Every selectable mood in display order.
pub fn all() -> &'static [Mood] {
    &MOODS
}

pub fn by_id(id: &str) -> Option<&'static Mood> {
    MOODS.iter().find(|mood| mood.id == id)
}

/// Moods currently trending around `city`.
///
/// There is no live signal behind this yet, so every city gets the same three.
pub fn trending(_city: &str) -> Vec<&'static Mood> {
    TRENDING.iter().filter_map(|id| by_id(id)).collect()
}
