use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use invitr_types::api::{AddGuestsRequest, GuestResponse, MessageResponse};

use crate::error::{ApiError, ApiResult};
use crate::extract::{CurrentUser, Json};
use crate::{AppState, blocking};

pub async fn list_guests(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
) -> ApiResult<Json<Vec<GuestResponse>>> {
    let guests = blocking(&state, move |state| {
        state.owned_event(&event_id, &user)?;
        Ok(state.db.list_guests(&event_id)?)
    })
    .await?;
    Ok(Json(guests.into_iter().map(GuestResponse::from).collect()))
}

/// Accepts a single guest object or `{"guests": [...]}`.
pub async fn add_guests(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
    Json(req): Json<AddGuestsRequest>,
) -> ApiResult<impl IntoResponse> {
    let guests = req.into_guests();
    if guests.is_empty() {
        return Err(ApiError::bad_request("No guests provided"));
    }
    if guests.iter().any(|g| g.name.trim().is_empty()) {
        return Err(ApiError::bad_request("Every guest needs a name"));
    }

    let created = blocking(&state, move |state| {
        state.owned_event(&event_id, &user)?;
        let created = state.db.insert_guests(&event_id, &guests)?;
        info!("Added {} guest(s) to event {}", created.len(), event_id);
        Ok(created)
    })
    .await?;

    let body: Vec<GuestResponse> = created.into_iter().map(GuestResponse::from).collect();
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn delete_guest(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((event_id, guest_id)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    blocking(&state, move |state| {
        state.owned_event(&event_id, &user)?;
        if !state.db.delete_guest(&event_id, &guest_id)? {
            return Err(ApiError::NotFound("Guest not found"));
        }
        Ok(())
    })
    .await?;
    Ok(Json(MessageResponse::new("Guest removed")))
}
