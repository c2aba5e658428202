use anyhow::Result;
use invitr_types::api::DashboardStats;
use uuid::Uuid;

use crate::models::{CommentRow, ShareRow};
use crate::{Database, now_timestamp};

const ANONYMOUS: &str = "Anonymous";

impl Database {
    pub fn add_comment(&self, event_id: &str, name: Option<&str>, content: &str) -> Result<CommentRow> {
        let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(ANONYMOUS);
        let row = CommentRow {
            id: Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            created_at: now_timestamp(),
        };

        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO comments (id, event_id, name, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![row.id, row.event_id, row.name, row.content, row.created_at],
            )?;
            Ok(())
        })?;

        Ok(row)
    }

    /// Newest comment first.
    pub fn list_comments(&self, event_id: &str) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, event_id, name, content, created_at FROM comments
                 WHERE event_id = ?1 ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt
                .query_map([event_id], |row| {
                    Ok(CommentRow {
                        id: row.get(0)?,
                        event_id: row.get(1)?,
                        name: row.get(2)?,
                        content: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn record_share(&self, event_id: &str, channel: Option<&str>) -> Result<ShareRow> {
        self.with_conn_mut(|conn| {
            let timestamp = now_timestamp();
            conn.execute(
                "INSERT INTO shares (event_id, channel, timestamp) VALUES (?1, ?2, ?3)",
                rusqlite::params![event_id, channel, timestamp],
            )?;
            Ok(ShareRow {
                id: conn.last_insert_rowid(),
                event_id: event_id.to_string(),
                channel: channel.map(str::to_string),
                timestamp,
            })
        })
    }

    pub fn record_view(&self, event_id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO views (event_id, timestamp) VALUES (?1, ?2)",
                rusqlite::params![event_id, now_timestamp()],
            )?;
            Ok(())
        })
    }

    pub fn dashboard_stats(&self, event_id: &str) -> Result<DashboardStats> {
        self.with_conn(|conn| {
            let (total_guests, rsvp_yes, rsvp_maybe, rsvp_no): (i64, i64, i64, i64) = conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(rsvp_status = 'Yes'), 0),
                        COALESCE(SUM(rsvp_status = 'Maybe'), 0),
                        COALESCE(SUM(rsvp_status = 'No'), 0)
                 FROM guests WHERE event_id = ?1",
                [event_id],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )?;
            let views: i64 =
                conn.query_row("SELECT COUNT(*) FROM views WHERE event_id = ?1", [event_id], |r| r.get(0))?;
            let comments: i64 = conn.query_row(
                "SELECT COUNT(*) FROM comments WHERE event_id = ?1",
                [event_id],
                |r| r.get(0),
            )?;

            Ok(DashboardStats {
                total_guests: total_guests as u64,
                rsvp_yes: rsvp_yes as u64,
                rsvp_maybe: rsvp_maybe as u64,
                rsvp_no: rsvp_no as u64,
                views: views as u64,
                comments: comments as u64,
            })
        })
    }
}
