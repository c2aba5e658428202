use anyhow::Result;
use invitr_types::api::CreateEventRequest;
use rusqlite::{OptionalExtension, Row};

use crate::models::EventRow;
use crate::{Database, now_timestamp};

const EVENT_COLUMNS: &str = "id, user_id, title, type, template_id, host_name, partner_name, \
     event_date, event_time, venue, dress_code, message, background_image_url, background_style, \
     contact_email, contact_phone, venue_latitude, venue_longitude, created_at";

const DEFAULT_TITLE: &str = "My Event";

impl Database {
    pub fn create_event(&self, id: &str, user_id: &str, req: CreateEventRequest) -> Result<EventRow> {
        let row = EventRow {
            id: id.to_string(),
            user_id: Some(user_id.to_string()),
            title: req.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            event_type: req.event_type,
            template_id: req.template_id,
            host_name: req.host_name,
            partner_name: req.partner_name,
            event_date: req.event_date,
            event_time: req.event_time,
            venue: req.venue,
            dress_code: req.dress_code,
            message: req.message,
            background_image_url: req.background_image_url,
            background_style: req.background_style,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
            venue_latitude: req.venue_latitude,
            venue_longitude: req.venue_longitude,
            created_at: now_timestamp(),
        };

        self.with_conn_mut(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO events ({EVENT_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
                ),
                rusqlite::params![
                    row.id,
                    row.user_id,
                    row.title,
                    row.event_type,
                    row.template_id,
                    row.host_name,
                    row.partner_name,
                    row.event_date,
                    row.event_time,
                    row.venue,
                    row.dress_code,
                    row.message,
                    row.background_image_url,
                    row.background_style,
                    row.contact_email,
                    row.contact_phone,
                    row.venue_latitude,
                    row.venue_longitude,
                    row.created_at,
                ],
            )?;
            Ok(())
        })?;

        Ok(row)
    }

    pub fn get_event(&self, id: &str) -> Result<Option<EventRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
                    [id],
                    map_event,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Events owned by `user_id`, most recent first.
    pub fn list_events_for_user(&self, user_id: &str) -> Result<Vec<EventRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {EVENT_COLUMNS} FROM events WHERE user_id = ?1 ORDER BY created_at DESC"
            ))?;
            let rows = stmt
                .query_map([user_id], map_event)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Write back every mutable column of `row`.
    pub fn update_event(&self, row: &EventRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "UPDATE events SET
                    title = ?2, type = ?3, template_id = ?4, host_name = ?5, partner_name = ?6,
                    event_date = ?7, event_time = ?8, venue = ?9, dress_code = ?10, message = ?11,
                    background_image_url = ?12, background_style = ?13, contact_email = ?14,
                    contact_phone = ?15, venue_latitude = ?16, venue_longitude = ?17
                 WHERE id = ?1",
                rusqlite::params![
                    row.id,
                    row.title,
                    row.event_type,
                    row.template_id,
                    row.host_name,
                    row.partner_name,
                    row.event_date,
                    row.event_time,
                    row.venue,
                    row.dress_code,
                    row.message,
                    row.background_image_url,
                    row.background_style,
                    row.contact_email,
                    row.contact_phone,
                    row.venue_latitude,
                    row.venue_longitude,
                ],
            )?;
            Ok(())
        })
    }

    /// Deletes the event; guests, comments, shares, views, venue and email
    /// logs go with it through `ON DELETE CASCADE`.
    pub fn delete_event(&self, id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute("DELETE FROM events WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }
}

fn map_event(row: &Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        event_type: row.get(3)?,
        template_id: row.get(4)?,
        host_name: row.get(5)?,
        partner_name: row.get(6)?,
        event_date: row.get(7)?,
        event_time: row.get(8)?,
        venue: row.get(9)?,
        dress_code: row.get(10)?,
        message: row.get(11)?,
        background_image_url: row.get(12)?,
        background_style: row.get(13)?,
        contact_email: row.get(14)?,
        contact_phone: row.get(15)?,
        venue_latitude: row.get(16)?,
        venue_longitude: row.get(17)?,
        created_at: row.get(18)?,
    })
}
