use anyhow::Result;
use invitr_types::models::{EmailKind, EmailStatus};
use uuid::Uuid;

use crate::{Database, now_timestamp};

impl Database {
    pub fn log_email(
        &self,
        event_id: &str,
        guest_id: Option<&str>,
        kind: EmailKind,
        recipient: &str,
        status: EmailStatus,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO email_logs (id, event_id, guest_id, email_type, recipient_email, sent_at, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    Uuid::new_v4().to_string(),
                    event_id,
                    guest_id,
                    kind.as_str(),
                    recipient,
                    now_timestamp(),
                    status.as_str(),
                ],
            )?;
            Ok(())
        })
    }

    /// `(sent, opened)` for an event. An opened email also counts as sent.
    pub fn email_counts(&self, event_id: &str) -> Result<(u64, u64)> {
        self.with_conn(|conn| {
            let (sent, opened): (i64, i64) = conn.query_row(
                "SELECT COALESCE(SUM(status IN ('sent', 'opened')), 0),
                        COALESCE(SUM(opened_at IS NOT NULL), 0)
                 FROM email_logs WHERE event_id = ?1",
                [event_id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )?;
            Ok((sent as u64, opened as u64))
        })
    }
}
