use axum::extract::{Path, State};
use tracing::{info, warn};

use invitr_types::api::{DietaryRequest, EventResponse, GuestResponse, RsvpRequest, RsvpResponse};
use invitr_types::models::{EmailKind, EmailStatus};

use crate::error::{ApiError, ApiResult};
use crate::extract::Json;
use crate::{AppState, AppStateInner, blocking};

/// Records a reply identified by invitation token or guest id. Re-submitting
/// simply overwrites the previous answer.
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<RsvpRequest>,
) -> ApiResult<Json<RsvpResponse>> {
    let guest = blocking(&state, move |state| {
        let guest = match (req.token.as_deref(), req.guest_id.as_deref()) {
            (Some(token), _) if !token.is_empty() => state.db.get_guest_by_token(token)?,
            (_, Some(id)) if !id.is_empty() => state.db.get_guest(id)?,
            _ => None,
        }
        .filter(|g| g.event_id == event_id)
        .ok_or_else(|| ApiError::bad_request("Invalid guest"))?;

        let event = state.event(&event_id)?;

        let guest = state
            .db
            .record_rsvp(
                &guest.id,
                req.status,
                req.plus_one_count,
                &req.notes,
                &req.dietary_restrictions,
            )?
            .ok_or(ApiError::NotFound("Guest not found"))?;
        info!("Guest {} answered {} for event {}", guest.id, guest.rsvp_status, event_id);

        let guest = GuestResponse::from(guest);
        send_confirmation(state, &EventResponse::from(event), &guest);
        Ok(guest)
    })
    .await?;

    Ok(Json(RsvpResponse {
        message: "RSVP updated".into(),
        guest,
    }))
}

/// Best effort: a failed confirmation is logged but never fails the RSVP.
fn send_confirmation(state: &AppStateInner, event: &EventResponse, guest: &GuestResponse) {
    let email = match invitr_mail::confirmation_email(event, guest) {
        Ok(Some(email)) => email,
        Ok(None) => return,
        Err(e) => {
            warn!("Failed to render confirmation email for guest {}: {:#}", guest.id, e);
            return;
        }
    };

    let status = match state.mailer.send(&email) {
        Ok(()) => EmailStatus::Sent,
        Err(e) => {
            warn!("Failed to send confirmation email to {}: {:#}", email.to, e);
            EmailStatus::Failed
        }
    };

    if let Err(e) = state
        .db
        .log_email(&event.id, Some(guest.id.as_str()), EmailKind::Confirmation, &email.to, status)
    {
        warn!("Failed to log confirmation email for guest {}: {:#}", guest.id, e);
    }
}

pub async fn update_dietary(
    State(state): State<AppState>,
    Path(guest_id): Path<String>,
    Json(req): Json<DietaryRequest>,
) -> ApiResult<Json<RsvpResponse>> {
    let guest = blocking(&state, move |state| {
        let dietary = req.dietary_restrictions.as_deref().map(str::trim);
        state
            .db
            .update_dietary_restrictions(&guest_id, dietary)?
            .ok_or(ApiError::NotFound("Guest not found"))
    })
    .await?;

    Ok(Json(RsvpResponse {
        message: "Dietary restrictions updated".into(),
        guest: guest.into(),
    }))
}
