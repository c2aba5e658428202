use anyhow::Result;
use invitr_types::api::VenueRequest;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::Database;
use crate::models::VenueRow;

impl Database {
    /// One venue per event; saving again replaces the details but keeps the id.
    pub fn upsert_venue(&self, event_id: &str, req: &VenueRequest) -> Result<VenueRow> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO venues (id, event_id, place_id, name, address, latitude, longitude,
                                     venue_type, parking_info, accessibility_notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(event_id) DO UPDATE SET
                    place_id = excluded.place_id,
                    name = excluded.name,
                    address = excluded.address,
                    latitude = excluded.latitude,
                    longitude = excluded.longitude,
                    venue_type = excluded.venue_type,
                    parking_info = excluded.parking_info,
                    accessibility_notes = excluded.accessibility_notes",
                rusqlite::params![
                    Uuid::new_v4().to_string(),
                    event_id,
                    req.place_id,
                    req.name,
                    req.address,
                    req.latitude,
                    req.longitude,
                    req.venue_type,
                    req.parking_info,
                    req.accessibility_notes,
                ],
            )?;
            // Also keep the event's own coordinates in step with the venue.
            conn.execute(
                "UPDATE events SET venue = ?2, venue_latitude = ?3, venue_longitude = ?4 WHERE id = ?1",
                rusqlite::params![event_id, req.address, req.latitude, req.longitude],
            )?;
            query_venue(conn, event_id)?
                .ok_or_else(|| anyhow::anyhow!("venue for event {} vanished after upsert", event_id))
        })
    }

    pub fn get_venue(&self, event_id: &str) -> Result<Option<VenueRow>> {
        self.with_conn(|conn| query_venue(conn, event_id))
    }
}

fn query_venue(conn: &rusqlite::Connection, event_id: &str) -> Result<Option<VenueRow>> {
    let row = conn
        .query_row(
            "SELECT id, event_id, place_id, name, address, latitude, longitude,
                    venue_type, parking_info, accessibility_notes
             FROM venues WHERE event_id = ?1",
            [event_id],
            |row| {
                Ok(VenueRow {
                    id: row.get(0)?,
                    event_id: row.get(1)?,
                    place_id: row.get(2)?,
                    name: row.get(3)?,
                    address: row.get(4)?,
                    latitude: row.get(5)?,
                    longitude: row.get(6)?,
                    venue_type: row.get(7)?,
                    parking_info: row.get(8)?,
                    accessibility_notes: row.get(9)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}
