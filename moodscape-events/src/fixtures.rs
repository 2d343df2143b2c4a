//! Sample data bundled with the crate.
//!
//! The server starts from these records when no catalog file is given, and
//! the tests use them as a known catalog of eight events.

use crate::{Analytics, Catalog, Organization, Result};

const EVENTS_JSON: &str = include_str!("../data/events.json");
const ORGANIZATION_JSON: &str = include_str!("../data/organization.json");
const ANALYTICS_JSON: &str = include_str!("../data/analytics.json");

/// Parses the bundled catalog.
pub fn load_sample_catalog() -> Result<Catalog> {
    Catalog::from_json(EVENTS_JSON)
}

pub fn load_sample_organization() -> Result<Organization> {
    Ok(serde_json::from_str(ORGANIZATION_JSON)?)
}

pub fn load_sample_analytics() -> Result<Analytics> {
    Ok(serde_json::from_str(ANALYTICS_JSON)?)
}

/// Returns the bundled catalog:
/// - 8 events, ids "1" to "8", one per mood
/// - two music events ("1" and "8") and two art events ("2" and "7")
/// - events "1" to "4" belong to organizer "1"
#[cfg(test)]
pub fn sample_catalog() -> Catalog {
    load_sample_catalog().expect("bundled events.json is valid")
}
