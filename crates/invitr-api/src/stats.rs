use axum::extract::{Path, State};

use invitr_types::api::{EventStatistics, GuestResponse};

use crate::error::ApiResult;
use crate::extract::{CurrentUser, Json};
use crate::{AppState, blocking};

pub async fn event_statistics(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
) -> ApiResult<Json<EventStatistics>> {
    let stats = blocking(&state, move |state| {
        state.owned_event(&event_id, &user)?;
        let guests: Vec<GuestResponse> = state
            .db
            .list_guests(&event_id)?
            .into_iter()
            .map(GuestResponse::from)
            .collect();
        let (sent, opened) = state.db.email_counts(&event_id)?;
        Ok(invitr_export::event_statistics(&guests, sent, opened))
    })
    .await?;
    Ok(Json(stats))
}
