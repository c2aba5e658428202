use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use tower_http::services::ServeDir;

use invitr_templates::Catalogue;

use crate::{
    AppState, activity, auth, designs, events, exports, guests, invitations, rsvp, stats, venues,
};

/// Rendered invitations arrive as base64 PNGs and can be several megabytes.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Every HTTP route. Authentication is enforced per handler by the
/// `CurrentUser` extractor, so public and private routes share one router.
pub fn router(state: AppState) -> Router {
    let account_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/profile", put(auth::update_profile));

    let event_routes = Router::new()
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route(
            "/api/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/event/{id}", get(events::view_invitation))
        .route("/api/events/{id}/guests", get(guests::list_guests).post(guests::add_guests))
        .route("/api/events/{id}/guests/{guest_id}", delete(guests::delete_guest))
        .route("/api/events/{id}/guests/import", post(exports::import_guests))
        .route("/api/events/{id}/guests/export", get(exports::export_guests))
        .route("/api/events/{id}/rsvp", post(rsvp::submit_rsvp))
        .route("/api/rsvp/{guest_id}/dietary", put(rsvp::update_dietary))
        .route(
            "/api/events/{id}/comments",
            get(activity::list_comments).post(activity::add_comment),
        )
        .route("/api/events/{id}/shares", post(activity::record_share))
        .route("/api/events/{id}/dashboard_stats", get(activity::dashboard_stats))
        .route("/api/events/{id}/statistics", get(stats::event_statistics))
        .route("/api/events/{id}/venue", get(venues::get_venue).put(venues::put_venue))
        .route("/api/events/{id}/qrcode", get(exports::qrcode))
        .route("/api/events/{id}/send-invitations", post(invitations::send_invitations));

    let tool_routes = Router::new()
        .route("/api/templates", get(templates))
        .route("/api/venues/autocomplete", get(venues::autocomplete))
        .route("/api/venues/geocode", post(venues::geocode))
        .route("/api/download", post(exports::download))
        .route("/api/save-design", post(designs::save_design))
        .route("/api/load-design/{id}", get(designs::load_design))
        .route("/api/my-designs", get(designs::my_designs))
        .route("/api/delete-design/{id}", delete(designs::delete_design));

    let qr_files = ServeDir::new(&state.qr_dir);

    Router::new()
        .route("/health", get(health))
        .merge(account_routes)
        .merge(event_routes)
        .merge(tool_routes)
        .nest_service("/static/qrcodes", qr_files)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn templates(State(state): State<AppState>) -> Json<Catalogue> {
    Json(state.templates.clone())
}
