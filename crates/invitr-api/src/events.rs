use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};
use uuid::Uuid;

use invitr_types::api::{
    CreateEventRequest, EventResponse, GuestResponse, InvitationQuery, InvitationView,
    MessageResponse, UpdateEventRequest,
};

use crate::error::{ApiError, ApiResult};
use crate::extract::{CurrentUser, Json};
use crate::{AppState, blocking};

pub async fn list_events(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let events = blocking(&state, move |state| {
        Ok(state.db.list_events_for_user(&user.id)?)
    })
    .await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

pub async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateEventRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.event_type.trim().is_empty() {
        return Err(ApiError::bad_request("Event type is required"));
    }
    if req.template_id.trim().is_empty() {
        return Err(ApiError::bad_request("Template is required"));
    }

    let event = blocking(&state, move |state| {
        let id = Uuid::new_v4().to_string();
        Ok(state.db.create_event(&id, &user.id, req)?)
    })
    .await?;

    info!("Created event {} ({})", event.id, event.event_type);
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<EventResponse>> {
    let event = blocking(&state, move |state| state.event(&event_id)).await?;
    Ok(Json(event.into()))
}

pub async fn update_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let event = blocking(&state, move |state| {
        let mut event = state.owned_event(&event_id, &user)?;
        event.apply(req);
        state.db.update_event(&event)?;
        Ok(event)
    })
    .await?;
    Ok(Json(event.into()))
}

pub async fn delete_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    blocking(&state, move |state| {
        state.owned_event(&event_id, &user)?;
        state.db.delete_event(&event_id)?;
        info!("Deleted event {}", event_id);
        Ok(())
    })
    .await?;
    Ok(Json(MessageResponse::new("Event deleted")))
}

/// The public invitation page. Every visit counts as a view; a valid
/// `?guest=` token also marks that guest's invitation as opened.
pub async fn view_invitation(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<InvitationQuery>,
) -> ApiResult<Json<InvitationView>> {
    let view = blocking(&state, move |state| {
        let event = state.event(&event_id)?;
        state.db.record_view(&event_id)?;

        let guest = match query.guest.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => {
                let guest = state.db.mark_invitation_opened(&event_id, token)?;
                if guest.is_none() {
                    debug!("Unknown guest token on event {}", event_id);
                }
                guest.map(GuestResponse::from)
            }
            None => None,
        };

        Ok(InvitationView {
            event: event.into(),
            guest,
        })
    })
    .await?;
    Ok(Json(view))
}
