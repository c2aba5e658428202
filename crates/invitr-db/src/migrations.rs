use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                email       TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                name        TEXT NOT NULL,
                phone       TEXT,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE events (
                id                    TEXT PRIMARY KEY,
                user_id               TEXT REFERENCES users(id) ON DELETE CASCADE,
                title                 TEXT NOT NULL,
                type                  TEXT NOT NULL,
                template_id           TEXT NOT NULL,
                host_name             TEXT,
                partner_name          TEXT,
                event_date            TEXT,
                event_time            TEXT,
                venue                 TEXT,
                dress_code            TEXT,
                message               TEXT,
                background_image_url  TEXT,
                background_style      TEXT,
                contact_email         TEXT,
                contact_phone         TEXT,
                venue_latitude        REAL,
                venue_longitude       REAL,
                created_at            TEXT NOT NULL
            );

            CREATE INDEX idx_events_user ON events(user_id, created_at);

            CREATE TABLE guests (
                id                    TEXT PRIMARY KEY,
                event_id              TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
                name                  TEXT NOT NULL,
                email                 TEXT,
                phone                 TEXT,
                rsvp_status           TEXT NOT NULL DEFAULT 'Pending',
                rsvp_time             TEXT,
                plus_one_count        INTEGER NOT NULL DEFAULT 0,
                notes                 TEXT,
                dietary_restrictions  TEXT,
                invitation_sent_at    TEXT,
                invitation_opened_at  TEXT,
                unique_token          TEXT NOT NULL UNIQUE,
                created_at            TEXT NOT NULL
            );

            CREATE INDEX idx_guests_event ON guests(event_id);

            CREATE TABLE comments (
                id          TEXT PRIMARY KEY,
                event_id    TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
                name        TEXT NOT NULL,
                content     TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX idx_comments_event ON comments(event_id, created_at);

            CREATE TABLE shares (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                event_id    TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
                channel     TEXT,
                timestamp   TEXT NOT NULL
            );

            CREATE TABLE views (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                event_id    TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
                timestamp   TEXT NOT NULL
            );

            CREATE INDEX idx_views_event ON views(event_id);

            CREATE TABLE venues (
                id                   TEXT PRIMARY KEY,
                event_id             TEXT NOT NULL UNIQUE REFERENCES events(id) ON DELETE CASCADE,
                place_id             TEXT,
                name                 TEXT,
                address              TEXT NOT NULL,
                latitude             REAL,
                longitude            REAL,
                venue_type           TEXT,
                parking_info         TEXT,
                accessibility_notes  TEXT
            );

            CREATE TABLE email_logs (
                id               TEXT PRIMARY KEY,
                event_id         TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
                guest_id         TEXT REFERENCES guests(id) ON DELETE SET NULL,
                email_type       TEXT NOT NULL,
                recipient_email  TEXT NOT NULL,
                sent_at          TEXT NOT NULL,
                opened_at        TEXT,
                clicked_at       TEXT,
                status           TEXT NOT NULL DEFAULT 'sent'
            );

            CREATE INDEX idx_email_logs_event ON email_logs(event_id);

            CREATE TABLE custom_designs (
                id             TEXT PRIMARY KEY,
                user_id        TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title          TEXT NOT NULL DEFAULT 'Untitled Design',
                canvas_data    TEXT NOT NULL,
                thumbnail_url  TEXT,
                created_at     TEXT NOT NULL,
                updated_at     TEXT NOT NULL
            );

            CREATE INDEX idx_designs_user ON custom_designs(user_id, updated_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, 1);
    }
}
