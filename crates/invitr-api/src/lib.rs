pub mod activity;
pub mod auth;
pub mod designs;
pub mod error;
pub mod events;
pub mod exports;
pub mod extract;
pub mod geocode;
pub mod guests;
pub mod invitations;
pub mod router;
pub mod rsvp;
pub mod stats;
pub mod venues;

use std::path::PathBuf;
use std::sync::Arc;

use invitr_db::Database;
use invitr_db::models::EventRow;
use invitr_mail::Mailer;
use invitr_templates::Catalogue;
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::extract::CurrentUser;
use crate::geocode::Geocoder;

pub use router::router;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    /// Base for links that leave the server: invitation URLs, QR codes.
    pub public_url: String,
    pub qr_dir: PathBuf,
    pub mailer: Arc<dyn Mailer>,
    pub geocoder: Arc<dyn Geocoder>,
    pub templates: Catalogue,
}

/// Run blocking work (SQLite, SMTP, HTTP geocoding) off the async runtime.
pub(crate) async fn blocking<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&AppStateInner) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.into())
        })?
}

impl AppStateInner {
    pub(crate) fn event(&self, event_id: &str) -> ApiResult<EventRow> {
        self.db
            .get_event(event_id)?
            .ok_or(ApiError::NotFound("Event not found"))
    }

    /// The event, provided `user` owns it.
    pub(crate) fn owned_event(&self, event_id: &str, user: &CurrentUser) -> ApiResult<EventRow> {
        let event = self.event(event_id)?;
        if !event.is_owned_by(&user.id) {
            return Err(ApiError::Forbidden);
        }
        Ok(event)
    }
}
