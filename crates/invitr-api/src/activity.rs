//! Public engagement on an invitation: comments, shares and the dashboard
//! counters derived from them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use invitr_db::parse_timestamp;
use invitr_types::api::{CommentRequest, CommentResponse, DashboardStats, ShareRequest, ShareResponse};

use crate::error::{ApiError, ApiResult};
use crate::extract::Json;
use crate::{AppState, blocking};

pub async fn list_comments(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = blocking(&state, move |state| {
        state.event(&event_id)?;
        Ok(state.db.list_comments(&event_id)?)
    })
    .await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let content = req.content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::bad_request("Comment cannot be empty"));
    }

    let comment = blocking(&state, move |state| {
        state.event(&event_id)?;
        Ok(state.db.add_comment(&event_id, req.name.as_deref(), &content)?)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

pub async fn record_share(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<ShareRequest>,
) -> ApiResult<impl IntoResponse> {
    let share = blocking(&state, move |state| {
        state.event(&event_id)?;
        Ok(state.db.record_share(&event_id, req.channel.as_deref())?)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShareResponse {
            id: share.id,
            channel: share.channel,
            timestamp: parse_timestamp(&share.timestamp),
        }),
    ))
}

pub async fn dashboard_stats(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<DashboardStats>> {
    let stats = blocking(&state, move |state| {
        state.event(&event_id)?;
        Ok(state.db.dashboard_stats(&event_id)?)
    })
    .await?;
    Ok(Json(stats))
}
