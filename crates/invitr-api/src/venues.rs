use axum::extract::{Path, Query, State};
use tracing::warn;

use invitr_types::api::{AutocompleteQuery, GeocodeRequest, VenueRequest, VenueResponse, VenueSuggestion};

use crate::error::{ApiError, ApiResult};
use crate::extract::{CurrentUser, Json};
use crate::{AppState, blocking};

const MIN_QUERY_LEN: usize = 3;
const DEFAULT_COUNTRY: &str = "in";
const SUGGESTION_LIMIT: usize = 5;

/// Lookup failures degrade to an empty list; the form keeps working.
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> ApiResult<Json<Vec<VenueSuggestion>>> {
    let q = query.q.trim().to_string();
    if q.chars().count() < MIN_QUERY_LEN {
        return Ok(Json(vec![]));
    }
    let country = query
        .country
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

    let suggestions = blocking(&state, move |state| {
        Ok(state
            .geocoder
            .autocomplete(&q, &country, SUGGESTION_LIMIT)
            .unwrap_or_else(|e| {
                warn!("Venue autocomplete for '{}' failed: {:#}", q, e);
                vec![]
            }))
    })
    .await?;
    Ok(Json(suggestions))
}

pub async fn geocode(
    State(state): State<AppState>,
    Json(req): Json<GeocodeRequest>,
) -> ApiResult<Json<VenueSuggestion>> {
    let address = req
        .address
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request("Address is required"))?;

    blocking(&state, move |state| {
        match state.geocoder.geocode(&address) {
            Ok(Some(place)) => Ok(Json(place)),
            Ok(None) => Err(ApiError::NotFound("Location not found")),
            Err(e) => {
                warn!("Geocoding '{}' failed: {:#}", address, e);
                Err(ApiError::NotFound("Location not found"))
            }
        }
    })
    .await
}

pub async fn get_venue(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<VenueResponse>> {
    let venue = blocking(&state, move |state| {
        state.event(&event_id)?;
        state
            .db
            .get_venue(&event_id)?
            .ok_or(ApiError::NotFound("No venue saved"))
    })
    .await?;
    Ok(Json(venue.into()))
}

/// Creates or replaces the event's venue; the event's own venue columns
/// follow along.
pub async fn put_venue(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
    Json(req): Json<VenueRequest>,
) -> ApiResult<Json<VenueResponse>> {
    if req.address.trim().is_empty() {
        return Err(ApiError::bad_request("Address is required"));
    }

    let venue = blocking(&state, move |state| {
        state.owned_event(&event_id, &user)?;
        Ok(state.db.upsert_venue(&event_id, &req)?)
    })
    .await?;
    Ok(Json(venue.into()))
}
