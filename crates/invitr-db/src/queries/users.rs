use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::models::UserRow;
use crate::{Database, now_timestamp};

const USER_COLUMNS: &str = "id, email, password, name, phone, created_at";

impl Database {
    pub fn create_user(
        &self,
        id: &str,
        email: &str,
        password_hash: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, password, name, phone, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![id, email, password_hash, name, phone, now_timestamp()],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    /// Returns false when the user no longer exists.
    pub fn update_user_profile(
        &self,
        id: &str,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE users SET name = ?2, email = ?3, phone = ?4 WHERE id = ?1",
                rusqlite::params![id, name, email, phone],
            )?;
            Ok(changed > 0)
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?1");
    let row = conn.query_row(&sql, [value], map_user).optional()?;
    Ok(row)
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password: row.get(2)?,
        name: row.get(3)?,
        phone: row.get(4)?,
        created_at: row.get(5)?,
    })
}
