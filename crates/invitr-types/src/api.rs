use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::RsvpStatus;

// -- JWT Claims --

/// Bearer token claims issued at login/registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub name: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

// -- Events --

#[derive(Debug, Default, Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub template_id: String,
    pub host_name: Option<String>,
    pub partner_name: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub venue: Option<String>,
    pub dress_code: Option<String>,
    pub message: Option<String>,
    pub background_image_url: Option<String>,
    pub background_style: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub venue_latitude: Option<f64>,
    pub venue_longitude: Option<f64>,
}

/// Partial update: only fields present in the body are changed.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub template_id: Option<String>,
    pub host_name: Option<String>,
    pub partner_name: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub venue: Option<String>,
    pub dress_code: Option<String>,
    pub message: Option<String>,
    pub background_image_url: Option<String>,
    pub background_style: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub venue_latitude: Option<f64>,
    pub venue_longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub template_id: String,
    pub host_name: Option<String>,
    pub partner_name: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub venue: Option<String>,
    pub dress_code: Option<String>,
    pub message: Option<String>,
    pub background_image_url: Option<String>,
    pub background_style: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub venue_latitude: Option<f64>,
    pub venue_longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

// -- Guests --

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewGuest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Either `{"guests": [...]}` or a single guest object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AddGuestsRequest {
    Bulk { guests: Vec<NewGuest> },
    Single(NewGuest),
}

impl AddGuestsRequest {
    pub fn into_guests(self) -> Vec<NewGuest> {
        match self {
            Self::Bulk { guests } => guests,
            Self::Single(guest) => vec![guest],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub plus_one_count: u32,
    pub dietary_restrictions: Option<String>,
    pub notes: Option<String>,
    pub unique_token: String,
    pub invitation_sent: Option<DateTime<Utc>>,
    pub invitation_opened: Option<DateTime<Utc>>,
    pub rsvp_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ImportGuestsResponse {
    pub message: String,
    pub count: usize,
    pub guests: Vec<GuestResponse>,
}

// -- RSVP --

#[derive(Debug, Deserialize)]
pub struct RsvpRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub guest_id: Option<String>,
    pub status: RsvpStatus,
    #[serde(default)]
    pub plus_one_count: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub dietary_restrictions: String,
}

#[derive(Debug, Serialize)]
pub struct RsvpResponse {
    pub message: String,
    pub guest: GuestResponse,
}

#[derive(Debug, Deserialize)]
pub struct DietaryRequest {
    pub dietary_restrictions: Option<String>,
}

// -- Comments, shares, views --

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    #[serde(default)]
    pub channel: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub id: i64,
    pub channel: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct InvitationQuery {
    pub guest: Option<String>,
}

/// Public invitation page data. `guest` is set when the link carried a
/// valid guest token.
#[derive(Debug, Serialize, Deserialize)]
pub struct InvitationView {
    pub event: EventResponse,
    pub guest: Option<GuestResponse>,
}

// -- Statistics --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_guests: u64,
    pub rsvp_yes: u64,
    pub rsvp_maybe: u64,
    pub rsvp_no: u64,
    pub views: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStatistics {
    pub total_guests: usize,
    pub rsvp_yes: usize,
    pub rsvp_no: usize,
    pub rsvp_maybe: usize,
    pub rsvp_pending: usize,
    pub total_attendees: u64,
    pub response_rate: f64,
    pub dietary_restrictions: BTreeMap<String, usize>,
    pub emails_sent: u64,
    pub emails_opened: u64,
}

// -- Venues --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSuggestion {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub venue_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub q: String,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueRequest {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub venue_type: Option<String>,
    pub parking_info: Option<String>,
    pub accessibility_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueResponse {
    pub id: String,
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub venue_type: Option<String>,
    pub parking_info: Option<String>,
    pub accessibility_notes: Option<String>,
}

// -- Exports & invitations --

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QrCodeResponse {
    pub qr_code_url: String,
    pub invitation_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendInvitationsRequest {
    #[serde(default)]
    pub guest_ids: Vec<String>,
}

/// Counters for one bulk send. `sent + failed + skipped == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct SendInvitationsResponse {
    pub message: String,
    pub stats: DispatchStats,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub image: String,
    pub format: String,
    #[serde(default)]
    pub title: Option<String>,
}

// -- Designs --

#[derive(Debug, Deserialize)]
pub struct SaveDesignRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub canvas_data: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveDesignResponse {
    pub success: bool,
    pub design_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignResponse {
    pub id: String,
    pub title: String,
    pub canvas_data: String,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSummary {
    pub id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadDesignResponse {
    pub success: bool,
    pub design: DesignResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DesignListResponse {
    pub success: bool,
    pub designs: Vec<DesignSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteDesignResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_guests_accepts_single_and_bulk_bodies() {
        let single: AddGuestsRequest =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com"}"#).unwrap();
        assert_eq!(single.into_guests().len(), 1);

        let bulk: AddGuestsRequest =
            serde_json::from_str(r#"{"guests":[{"name":"Ada"},{"name":"Grace"}]}"#).unwrap();
        let guests = bulk.into_guests();
        assert_eq!(guests.len(), 2);
        assert_eq!(guests[1].name, "Grace");
    }

    #[test]
    fn event_type_uses_type_key() {
        let req: CreateEventRequest =
            serde_json::from_str(r#"{"type":"Wedding","template_id":"wed_0_royal_navy_gold"}"#)
                .unwrap();
        assert_eq!(req.event_type, "Wedding");
        assert!(req.title.is_none());
    }
}
