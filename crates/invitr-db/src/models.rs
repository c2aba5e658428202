//! Database row types. These map directly to SQLite rows and stay separate
//! from the invitr-types API models; the `From` impls below do the mapping.

use invitr_types::RsvpStatus;
use invitr_types::api::{
    CommentResponse, DesignResponse, DesignSummary, EventResponse, GuestResponse,
    ProfileResponse, UpdateEventRequest, VenueResponse,
};

use crate::{parse_optional_timestamp, parse_timestamp};

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct EventRow {
    pub id: String,
    pub user_id: Option<String>,
    pub title: String,
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
    pub created_at: String,
}

impl EventRow {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }

    /// Overwrite every field the update carries, leave the rest alone.
    pub fn apply(&mut self, update: UpdateEventRequest) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        fn set_opt<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut self.title, update.title);
        set(&mut self.event_type, update.event_type);
        set(&mut self.template_id, update.template_id);
        set_opt(&mut self.host_name, update.host_name);
        set_opt(&mut self.partner_name, update.partner_name);
        set_opt(&mut self.event_date, update.event_date);
        set_opt(&mut self.event_time, update.event_time);
        set_opt(&mut self.venue, update.venue);
        set_opt(&mut self.dress_code, update.dress_code);
        set_opt(&mut self.message, update.message);
        set_opt(&mut self.background_image_url, update.background_image_url);
        set_opt(&mut self.background_style, update.background_style);
        set_opt(&mut self.contact_email, update.contact_email);
        set_opt(&mut self.contact_phone, update.contact_phone);
        set_opt(&mut self.venue_latitude, update.venue_latitude);
        set_opt(&mut self.venue_longitude, update.venue_longitude);
    }
}

#[derive(Debug, Clone)]
pub struct GuestRow {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub rsvp_time: Option<String>,
    pub plus_one_count: u32,
    pub notes: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub invitation_sent_at: Option<String>,
    pub invitation_opened_at: Option<String>,
    pub unique_token: String,
    pub created_at: String,
}

impl GuestRow {
    /// The guest's address when it is present and not blank.
    pub fn deliverable_email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

pub struct CommentRow {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub content: String,
    pub created_at: String,
}

pub struct ShareRow {
    pub id: i64,
    pub event_id: String,
    pub channel: Option<String>,
    pub timestamp: String,
}

pub struct VenueRow {
    pub id: String,
    pub event_id: String,
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub venue_type: Option<String>,
    pub parking_info: Option<String>,
    pub accessibility_notes: Option<String>,
}

pub struct DesignRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub canvas_data: String,
    pub thumbnail_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRow> for ProfileResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            phone: row.phone,
        }
    }
}

impl From<EventRow> for EventResponse {
    fn from(row: EventRow) -> Self {
        Self {
            created_at: parse_timestamp(&row.created_at),
            id: row.id,
            title: row.title,
            event_type: row.event_type,
            template_id: row.template_id,
            host_name: row.host_name,
            partner_name: row.partner_name,
            event_date: row.event_date,
            event_time: row.event_time,
            venue: row.venue,
            dress_code: row.dress_code,
            message: row.message,
            background_image_url: row.background_image_url,
            background_style: row.background_style,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            venue_latitude: row.venue_latitude,
            venue_longitude: row.venue_longitude,
        }
    }
}

impl From<GuestRow> for GuestResponse {
    fn from(row: GuestRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            rsvp_status: row.rsvp_status,
            plus_one_count: row.plus_one_count,
            dietary_restrictions: row.dietary_restrictions,
            notes: row.notes,
            unique_token: row.unique_token,
            invitation_sent: parse_optional_timestamp(row.invitation_sent_at),
            invitation_opened: parse_optional_timestamp(row.invitation_opened_at),
            rsvp_time: parse_optional_timestamp(row.rsvp_time),
        }
    }
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            created_at: parse_timestamp(&row.created_at),
            id: row.id,
            name: row.name,
            content: row.content,
        }
    }
}

impl From<VenueRow> for VenueResponse {
    fn from(row: VenueRow) -> Self {
        Self {
            id: row.id,
            place_id: row.place_id,
            name: row.name,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            venue_type: row.venue_type,
            parking_info: row.parking_info,
            accessibility_notes: row.accessibility_notes,
        }
    }
}

impl From<DesignRow> for DesignResponse {
    fn from(row: DesignRow) -> Self {
        Self {
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
            id: row.id,
            title: row.title,
            canvas_data: row.canvas_data,
            thumbnail_url: row.thumbnail_url,
        }
    }
}

impl From<DesignRow> for DesignSummary {
    fn from(row: DesignRow) -> Self {
        Self {
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
            id: row.id,
            title: row.title,
            thumbnail_url: row.thumbnail_url,
        }
    }
}
