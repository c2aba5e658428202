use anyhow::Result;
use rusqlite::{OptionalExtension, Row};
use uuid::Uuid;

use crate::models::DesignRow;
use crate::{Database, now_timestamp};

pub const UNTITLED_DESIGN: &str = "Untitled Design";

const DESIGN_COLUMNS: &str = "id, user_id, title, canvas_data, thumbnail_url, created_at, updated_at";

impl Database {
    pub fn create_design(
        &self,
        user_id: &str,
        title: &str,
        canvas_data: &str,
        thumbnail_url: Option<&str>,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.with_conn_mut(|conn| {
            let now = now_timestamp();
            conn.execute(
                &format!("INSERT INTO custom_designs ({DESIGN_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)"),
                rusqlite::params![id, user_id, title, canvas_data, thumbnail_url, now],
            )?;
            Ok(())
        })?;
        Ok(id)
    }

    /// Only the owner's design is touched. Returns false when there is none.
    pub fn update_design(
        &self,
        id: &str,
        user_id: &str,
        title: &str,
        canvas_data: &str,
        thumbnail_url: Option<&str>,
    ) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE custom_designs
                 SET title = ?3, canvas_data = ?4, thumbnail_url = COALESCE(?5, thumbnail_url),
                     updated_at = ?6
                 WHERE id = ?1 AND user_id = ?2",
                rusqlite::params![id, user_id, title, canvas_data, thumbnail_url, now_timestamp()],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn get_design(&self, id: &str) -> Result<Option<DesignRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {DESIGN_COLUMNS} FROM custom_designs WHERE id = ?1"),
                    [id],
                    map_design,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Most recently edited first.
    pub fn list_designs(&self, user_id: &str) -> Result<Vec<DesignRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DESIGN_COLUMNS} FROM custom_designs WHERE user_id = ?1
                 ORDER BY updated_at DESC, rowid DESC"
            ))?;
            let rows = stmt
                .query_map([user_id], map_design)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn delete_design(&self, id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute("DELETE FROM custom_designs WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }
}

fn map_design(row: &Row<'_>) -> rusqlite::Result<DesignRow> {
    Ok(DesignRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        canvas_data: row.get(3)?,
        thumbnail_url: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
