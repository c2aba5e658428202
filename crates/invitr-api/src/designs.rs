//! Free-form designs from the canvas editor, private to their author.

use axum::extract::{Path, State};
use tracing::info;

use invitr_db::queries::UNTITLED_DESIGN;
use invitr_db::models::DesignRow;
use invitr_types::api::{
    DeleteDesignResponse, DesignListResponse, DesignSummary, LoadDesignResponse, SaveDesignRequest,
    SaveDesignResponse,
};

use crate::error::{ApiError, ApiResult};
use crate::extract::{CurrentUser, Json};
use crate::{AppState, AppStateInner, blocking};

impl AppStateInner {
    fn owned_design(&self, design_id: &str, user: &CurrentUser) -> ApiResult<DesignRow> {
        let design = self
            .db
            .get_design(design_id)?
            .ok_or(ApiError::NotFound("Design not found"))?;
        if design.user_id != user.id {
            return Err(ApiError::Forbidden);
        }
        Ok(design)
    }
}

/// Creates a design, or updates it when `id` names one of the caller's own.
pub async fn save_design(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<SaveDesignRequest>,
) -> ApiResult<Json<SaveDesignResponse>> {
    let design_id = blocking(&state, move |state| {
        let thumbnail = req.thumbnail.as_deref();
        match req.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => {
                let existing = state
                    .db
                    .get_design(id)?
                    .filter(|d| d.user_id == user.id)
                    .ok_or(ApiError::Forbidden)?;
                let title = req.title.as_deref().unwrap_or(&existing.title);
                if !state.db.update_design(id, &user.id, title, &req.canvas_data, thumbnail)? {
                    return Err(ApiError::Forbidden);
                }
                Ok(existing.id)
            }
            None => {
                let title = req.title.as_deref().unwrap_or(UNTITLED_DESIGN);
                let id = state.db.create_design(&user.id, title, &req.canvas_data, thumbnail)?;
                info!("User {} created design {}", user.id, id);
                Ok(id)
            }
        }
    })
    .await?;

    Ok(Json(SaveDesignResponse {
        success: true,
        design_id,
        message: "Design saved successfully".into(),
    }))
}

pub async fn load_design(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(design_id): Path<String>,
) -> ApiResult<Json<LoadDesignResponse>> {
    let design = blocking(&state, move |state| state.owned_design(&design_id, &user)).await?;
    Ok(Json(LoadDesignResponse {
        success: true,
        design: design.into(),
    }))
}

pub async fn my_designs(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<DesignListResponse>> {
    let designs = blocking(&state, move |state| Ok(state.db.list_designs(&user.id)?)).await?;
    Ok(Json(DesignListResponse {
        success: true,
        designs: designs.into_iter().map(DesignSummary::from).collect(),
    }))
}

pub async fn delete_design(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(design_id): Path<String>,
) -> ApiResult<Json<DeleteDesignResponse>> {
    blocking(&state, move |state| {
        let design = state.owned_design(&design_id, &user)?;
        state.db.delete_design(&design.id)?;
        Ok(())
    })
    .await?;
    Ok(Json(DeleteDesignResponse {
        success: true,
        message: "Design deleted successfully".into(),
    }))
}
