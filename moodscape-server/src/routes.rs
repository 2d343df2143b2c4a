use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use log::{error, info, warn};
use moodscape_events::{
    moods,
    report::{self, ReportKind, UserSummary},
    to_calendar, EventCategory, EventFilter, Location,
};
use serde::Deserialize;

use crate::download::download;
use crate::state::AppState;

type Shared = Arc<AppState>;

pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/moods", get(list_moods))
        .route("/moods/trending", get(trending_moods))
        .route("/events", get(list_events))
        .route("/events/:id", get(event_detail))
        .route("/events/:id/calendar.ics", get(event_calendar))
        .route("/events/:id/google-calendar", get(event_google_calendar))
        .route("/recommendations", get(recommendations))
        .route("/session", get(session))
        .route("/session/mood/:mood_id", put(set_mood))
        .route(
            "/session/interests/:category",
            put(add_interest).delete(remove_interest),
        )
        .route(
            "/session/saved/:event_id",
            put(save_event).delete(unsave_event),
        )
        .route("/session/location", put(set_location))
        .route("/locations/search", get(search_locations))
        .route("/locations/reverse", get(reverse_location))
        .route("/dashboard/user", get(user_dashboard))
        .route("/reports/user", get(user_report))
        .route("/reports/organizer", get(organizer_report))
        .fallback(|| async { not_found("Route") })
        .with_state(state)
}

fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("{what} not found\n")).into_response()
}

async fn list_moods() -> Response {
    Json(moods::all()).into_response()
}

async fn trending_moods(State(state): State<Shared>) -> Response {
    let city = state.session.read().await.location.city.clone();
    Json(moods::trending(&city)).into_response()
}

async fn list_events(State(state): State<Shared>, Query(filter): Query<EventFilter>) -> Response {
    Json(filter.apply(&state.catalog)).into_response()
}

async fn event_detail(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.catalog.by_id(&id) {
        Some(event) => Json(event).into_response(),
        None => not_found("Event"),
    }
}

async fn event_calendar(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let Some(event) = state.catalog.by_id(&id) else {
        return not_found("Event");
    };

    match to_calendar(env!("CARGO_PKG_NAME"), &[event]) {
        Ok(calendar) => (
            [("content-type", "text/calendar")],
            calendar.to_string(),
        )
            .into_response(),
        Err(err) => {
            warn!("Calendar export failed: {err}");
            (StatusCode::UNPROCESSABLE_ENTITY, format!("{err}\n")).into_response()
        }
    }
}

async fn event_google_calendar(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let Some(event) = state.catalog.by_id(&id) else {
        return not_found("Event");
    };

    match event.google_calendar_url() {
        Ok(url) => Redirect::temporary(&url).into_response(),
        Err(err) => {
            warn!("Calendar link failed: {err}");
            (StatusCode::UNPROCESSABLE_ENTITY, format!("{err}\n")).into_response()
        }
    }
}

#[derive(Deserialize)]
struct RecommendationQuery {
    mood: Option<String>,
}

async fn recommendations(
    State(state): State<Shared>,
    Query(query): Query<RecommendationQuery>,
) -> Response {
    let session = state.session.read().await;
    let mood = query
        .mood
        .or_else(|| session.user.current_mood.as_ref().map(|mood| mood.id.clone()));

    let events = match mood {
        Some(mood) => state.catalog.recommend(&mood, &session.user.interests),
        None => Vec::new(),
    };

    Json(events).into_response()
}

async fn session(State(state): State<Shared>) -> Response {
    Json(state.session.read().await.clone()).into_response()
}

async fn set_mood(State(state): State<Shared>, Path(mood_id): Path<String>) -> Response {
    let Some(mood) = moods::by_id(&mood_id) else {
        return not_found("Mood");
    };

    let mut session = state.session.write().await;
    session.user.set_mood(mood.clone());
    info!("Session mood set to {mood_id}");
    Json(&session.user).into_response()
}

fn parse_category(raw: &str) -> Result<EventCategory, Response> {
    raw.parse()
        .map_err(|err| (StatusCode::BAD_REQUEST, format!("{err}\n")).into_response())
}

async fn add_interest(State(state): State<Shared>, Path(category): Path<String>) -> Response {
    let category = match parse_category(&category) {
        Ok(category) => category,
        Err(response) => return response,
    };

    let mut session = state.session.write().await;
    session.user.add_interest(category);
    Json(&session.user.interests).into_response()
}

async fn remove_interest(State(state): State<Shared>, Path(category): Path<String>) -> Response {
    let category = match parse_category(&category) {
        Ok(category) => category,
        Err(response) => return response,
    };

    let mut session = state.session.write().await;
    session.user.remove_interest(category);
    Json(&session.user.interests).into_response()
}

async fn save_event(State(state): State<Shared>, Path(event_id): Path<String>) -> Response {
    if state.catalog.by_id(&event_id).is_none() {
        return not_found("Event");
    }

    let mut session = state.session.write().await;
    session.user.save_event(&event_id);
    Json(&session.user.saved_events).into_response()
}

async fn unsave_event(State(state): State<Shared>, Path(event_id): Path<String>) -> Response {
    let mut session = state.session.write().await;
    session.user.unsave_event(&event_id);
    Json(&session.user.saved_events).into_response()
}

async fn set_location(State(state): State<Shared>, Json(location): Json<Location>) -> Response {
    let mut session = state.session.write().await;
    info!("Session location set to {}", location.city);
    session.location = location;
    Json(&session.location).into_response()
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_locations(
    State(state): State<Shared>,
    Query(query): Query<SearchQuery>,
) -> Response {
    match state.geocoder.search(&query.q).await {
        Ok(locations) => Json(locations.as_ref()).into_response(),
        Err(err) => {
            error!("Location search failed: {err:#}");
            (StatusCode::BAD_GATEWAY, "Failed to fetch location data\n").into_response()
        }
    }
}

#[derive(Deserialize)]
struct ReverseQuery {
    lat: f64,
    lon: f64,
}

async fn reverse_location(
    State(state): State<Shared>,
    Query(query): Query<ReverseQuery>,
) -> Response {
    match state.geocoder.reverse(query.lat, query.lon).await {
        Ok(location) => Json(location).into_response(),
        Err(err) => {
            error!("Reverse lookup failed: {err:#}");
            (StatusCode::BAD_GATEWAY, "Failed to fetch location data\n").into_response()
        }
    }
}

async fn user_dashboard(State(state): State<Shared>) -> Response {
    let session = state.session.read().await;
    Json(UserSummary::new(&session.user, &state.catalog)).into_response()
}

async fn user_report(State(state): State<Shared>) -> Response {
    let session = state.session.read().await;
    let user = &session.user;

    // Saved events first, then attended ones, each event once.
    let mut seen = HashSet::new();
    let events = state
        .catalog
        .resolve(&user.saved_events)
        .into_iter()
        .chain(state.catalog.resolve(&user.attended_events))
        .filter(|&event| seen.insert(event.id.as_str()))
        .collect::<Vec<_>>();

    let now = Utc::now();
    let text = report::user_report(user, &events, now);
    download(text, &ReportKind::User.filename(now.date_naive()))
}

async fn organizer_report(State(state): State<Shared>) -> Response {
    let events = state.catalog.resolve(&state.organization.events);

    let now = Utc::now();
    let text = report::organizer_report(&state.organization, &events, &state.analytics, now);
    download(text, &ReportKind::Organizer.filename(now.date_naive()))
}
