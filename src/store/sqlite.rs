use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::{Result, TuskError};
use crate::domain::Status;
use crate::store::StatusStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| TuskError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            TuskError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }
}

impl StatusStore for SqliteStore {
    fn save_status(&self, status: &Status, instance: &str) -> Result<()> {
        let payload = serde_json::to_string(status)?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO statuses (id, instance, payload, created_at, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id, instance) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at",
            params![
                status.id,
                instance,
                payload,
                status.created_at.to_rfc3339(),
                Utc::now().to_rfc3339()
            ],
        )?;

        Ok(())
    }

    fn get_status(&self, id: &str, instance: &str) -> Result<Option<Status>> {
        let conn = self.conn()?;

        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM statuses WHERE id = ?1 AND instance = ?2",
                params![id, instance],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    fn status_count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM statuses", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
