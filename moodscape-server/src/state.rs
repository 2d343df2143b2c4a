use moodscape_events::{Analytics, Catalog, Location, Organization, User};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::geocoder::Geocoder;

/// The one in-memory session. Lost on restart.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: User,
    pub location: Location,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            user: User::guest(),
            location: Location::default_city(),
        }
    }
}

pub struct AppState {
    pub catalog: Catalog,
    pub organization: Organization,
    pub analytics: Analytics,
    pub session: RwLock<Session>,
    pub geocoder: Geocoder,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        organization: Organization,
        analytics: Analytics,
        geocoder: Geocoder,
    ) -> Self {
        AppState {
            catalog,
            organization,
            analytics,
            session: RwLock::new(Session::default()),
            geocoder,
        }
    }
}
