use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::warn;

use invitr_mail::Outcome;
use invitr_types::api::{
    EventResponse, GuestResponse, MessageResponse, SendInvitationsRequest, SendInvitationsResponse,
};
use invitr_types::models::{EmailKind, EmailStatus};

use crate::error::{ApiError, ApiResult};
use crate::extract::{CurrentUser, Json};
use crate::{AppState, blocking};

/// Emails the selected guests, or every guest with an address who has not
/// been invited yet. An empty body counts as "everyone pending".
pub async fn send_invitations(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    let req: SendInvitationsRequest = if body.iter().all(u8::is_ascii_whitespace) {
        SendInvitationsRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::bad_request(e.to_string()))?
    };

    blocking(&state, move |state| {
        let event = state.owned_event(&event_id, &user)?;
        let guests = if req.guest_ids.is_empty() {
            state.db.guests_awaiting_invitation(&event_id)?
        } else {
            state.db.get_guests_by_ids(&event_id, &req.guest_ids)?
        };

        if guests.is_empty() {
            return Ok(Json(MessageResponse::new("No guests to send invitations to")).into_response());
        }

        let event = EventResponse::from(event);
        let guests: Vec<GuestResponse> = guests.into_iter().map(GuestResponse::from).collect();
        let report =
            invitr_mail::send_bulk_invitations(state.mailer.as_ref(), &event, &guests, &state.public_url);

        for outcome in &report.outcomes {
            let (guest_id, recipient, status) = match outcome {
                Outcome::Sent { guest_id, recipient } => {
                    if let Err(e) = state.db.mark_invitation_sent(guest_id) {
                        warn!("Failed to mark invitation sent for guest {}: {:#}", guest_id, e);
                    }
                    (guest_id, recipient, EmailStatus::Sent)
                }
                Outcome::Failed { guest_id, recipient } => (guest_id, recipient, EmailStatus::Failed),
                Outcome::Skipped { .. } => continue,
            };
            if let Err(e) =
                state
                    .db
                    .log_email(&event.id, Some(guest_id.as_str()), EmailKind::Invitation, recipient, status)
            {
                warn!("Failed to log invitation email for guest {}: {:#}", guest_id, e);
            }
        }

        Ok(Json(SendInvitationsResponse {
            message: "Invitations sent".into(),
            stats: report.stats,
        })
        .into_response())
    })
    .await
}
