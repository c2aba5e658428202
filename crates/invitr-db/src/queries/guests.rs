use anyhow::Result;
use invitr_types::RsvpStatus;
use invitr_types::api::NewGuest;
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::warn;
use uuid::Uuid;

use crate::models::GuestRow;
use crate::{Database, now_timestamp};

const GUEST_COLUMNS: &str = "id, event_id, name, email, phone, rsvp_status, rsvp_time, \
     plus_one_count, notes, dietary_restrictions, invitation_sent_at, invitation_opened_at, \
     unique_token, created_at";

impl Database {
    /// Insert all guests in one transaction, each with a fresh invitation token.
    pub fn insert_guests(&self, event_id: &str, guests: &[NewGuest]) -> Result<Vec<GuestRow>> {
        self.with_conn_mut(|conn| {
            let mut stmt = conn.prepare(&format!(
                "INSERT INTO guests ({GUEST_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
            ))?;

            let mut created = Vec::with_capacity(guests.len());
            for guest in guests {
                let row = GuestRow {
                    id: Uuid::new_v4().to_string(),
                    event_id: event_id.to_string(),
                    name: guest.name.trim().to_string(),
                    email: guest.email.clone(),
                    phone: guest.phone.clone(),
                    rsvp_status: RsvpStatus::Pending,
                    rsvp_time: None,
                    plus_one_count: 0,
                    notes: guest.notes.clone(),
                    dietary_restrictions: guest.dietary_restrictions.clone(),
                    invitation_sent_at: None,
                    invitation_opened_at: None,
                    unique_token: Uuid::new_v4().to_string(),
                    created_at: now_timestamp(),
                };
                stmt.execute(rusqlite::params![
                    row.id,
                    row.event_id,
                    row.name,
                    row.email,
                    row.phone,
                    row.rsvp_status.as_str(),
                    row.rsvp_time,
                    row.plus_one_count,
                    row.notes,
                    row.dietary_restrictions,
                    row.invitation_sent_at,
                    row.invitation_opened_at,
                    row.unique_token,
                    row.created_at,
                ])?;
                created.push(row);
            }
            Ok(created)
        })
    }

    pub fn list_guests(&self, event_id: &str) -> Result<Vec<GuestRow>> {
        self.with_conn(|conn| {
            query_guests(
                conn,
                &format!("SELECT {GUEST_COLUMNS} FROM guests WHERE event_id = ?1 ORDER BY created_at, rowid"),
                &[&event_id],
            )
        })
    }

    pub fn get_guest(&self, id: &str) -> Result<Option<GuestRow>> {
        self.with_conn(|conn| query_guest(conn, id))
    }

    pub fn get_guest_by_token(&self, token: &str) -> Result<Option<GuestRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {GUEST_COLUMNS} FROM guests WHERE unique_token = ?1"),
                    [token],
                    map_guest,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// The subset of `ids` that belong to `event_id`.
    pub fn get_guests_by_ids(&self, event_id: &str, ids: &[String]) -> Result<Vec<GuestRow>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        self.with_conn(|conn| {
            let placeholders: Vec<String> = (2..=ids.len() + 1).map(|i| format!("?{}", i)).collect();
            let sql = format!(
                "SELECT {GUEST_COLUMNS} FROM guests WHERE event_id = ?1 AND id IN ({}) ORDER BY created_at, rowid",
                placeholders.join(", ")
            );

            let mut params: Vec<&dyn rusqlite::types::ToSql> = Vec::with_capacity(ids.len() + 1);
            params.push(&event_id);
            params.extend(ids.iter().map(|id| id as &dyn rusqlite::types::ToSql));

            query_guests(conn, &sql, &params)
        })
    }

    /// Guests with an email address who have not been sent an invitation yet.
    pub fn guests_awaiting_invitation(&self, event_id: &str) -> Result<Vec<GuestRow>> {
        self.with_conn(|conn| {
            query_guests(
                conn,
                &format!(
                    "SELECT {GUEST_COLUMNS} FROM guests
                     WHERE event_id = ?1
                       AND email IS NOT NULL AND TRIM(email) != ''
                       AND invitation_sent_at IS NULL
                     ORDER BY created_at, rowid"
                ),
                &[&event_id],
            )
        })
    }

    /// Store a guest's reply. Returns the updated guest, or `None` if unknown.
    pub fn record_rsvp(
        &self,
        guest_id: &str,
        status: RsvpStatus,
        plus_one_count: u32,
        notes: &str,
        dietary_restrictions: &str,
    ) -> Result<Option<GuestRow>> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE guests
                 SET rsvp_status = ?2, plus_one_count = ?3, notes = ?4,
                     dietary_restrictions = ?5, rsvp_time = ?6
                 WHERE id = ?1",
                rusqlite::params![
                    guest_id,
                    status.as_str(),
                    plus_one_count,
                    notes,
                    dietary_restrictions,
                    now_timestamp(),
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            query_guest(conn, guest_id)
        })
    }

    pub fn update_dietary_restrictions(
        &self,
        guest_id: &str,
        dietary_restrictions: Option<&str>,
    ) -> Result<Option<GuestRow>> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE guests SET dietary_restrictions = ?2 WHERE id = ?1",
                rusqlite::params![guest_id, dietary_restrictions],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            query_guest(conn, guest_id)
        })
    }

    pub fn mark_invitation_sent(&self, guest_id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "UPDATE guests SET invitation_sent_at = ?2 WHERE id = ?1",
                rusqlite::params![guest_id, now_timestamp()],
            )?;
            Ok(())
        })
    }

    /// First open of an invitation link: stamps the guest and the matching
    /// invitation email log. Later opens leave the first timestamps intact.
    pub fn mark_invitation_opened(&self, event_id: &str, token: &str) -> Result<Option<GuestRow>> {
        self.with_conn_mut(|conn| {
            let guest = conn
                .query_row(
                    &format!(
                        "SELECT {GUEST_COLUMNS} FROM guests WHERE unique_token = ?1 AND event_id = ?2"
                    ),
                    [token, event_id],
                    map_guest,
                )
                .optional()?;

            let Some(guest) = guest else {
                return Ok(None);
            };
            if guest.invitation_opened_at.is_some() {
                return Ok(Some(guest));
            }

            let now = now_timestamp();
            conn.execute(
                "UPDATE guests SET invitation_opened_at = ?2 WHERE id = ?1",
                rusqlite::params![guest.id, now],
            )?;
            conn.execute(
                "UPDATE email_logs SET opened_at = ?2, status = 'opened'
                 WHERE guest_id = ?1 AND email_type = 'invitation'
                   AND status = 'sent' AND opened_at IS NULL",
                rusqlite::params![guest.id, now],
            )?;

            query_guest(conn, &guest.id)
        })
    }

    pub fn delete_guest(&self, event_id: &str, guest_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute(
                "DELETE FROM guests WHERE id = ?1 AND event_id = ?2",
                [guest_id, event_id],
            )?;
            Ok(deleted > 0)
        })
    }
}

fn query_guest(conn: &Connection, id: &str) -> Result<Option<GuestRow>> {
    let row = conn
        .query_row(
            &format!("SELECT {GUEST_COLUMNS} FROM guests WHERE id = ?1"),
            [id],
            map_guest,
        )
        .optional()?;
    Ok(row)
}

fn query_guests(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Vec<GuestRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, map_guest)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn map_guest(row: &Row<'_>) -> rusqlite::Result<GuestRow> {
    let id: String = row.get(0)?;
    let raw_status: String = row.get(5)?;
    let rsvp_status = raw_status.parse().unwrap_or_else(|e| {
        warn!("Guest '{}' has {}; treating as Pending", id, e);
        RsvpStatus::Pending
    });

    Ok(GuestRow {
        id,
        event_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        rsvp_status,
        rsvp_time: row.get(6)?,
        plus_one_count: row.get(7)?,
        notes: row.get(8)?,
        dietary_restrictions: row.get(9)?,
        invitation_sent_at: row.get(10)?,
        invitation_opened_at: row.get(11)?,
        unique_token: row.get(12)?,
        created_at: row.get(13)?,
    })
}
