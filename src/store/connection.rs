// src/store/connection.rs

use super::error::StoreResult;
use super::schema::ensure_value_table;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, warn};

pub struct DbConnection;

impl DbConnection {
    /// Opens (or creates) a database file, enables WAL mode and makes sure the
    /// value table exists.
    pub fn open(path: &Path, table_name: &str) -> StoreResult<Connection> {
        let conn = Connection::open(path)?;

        // PRAGMA journal_mode=WAL returns the mode that was set
        let journal_mode: String = conn.query_row(
            "PRAGMA journal_mode=WAL",
            [],
            |row| row.get(0)
        )?;

        if journal_mode.to_uppercase() != "WAL" {
            warn!(
                "Failed to set WAL mode on database {:?}. Current mode: {}",
                path.file_name(),
                journal_mode
            );
        } else {
            debug!("WAL mode activated for database {:?}", path.file_name());
        }

        Self::apply_pragmas(&conn)?;
        ensure_value_table(&conn, table_name)?;
        Ok(conn)
    }

    /// In-memory database with the value table, for tools and tests.
    pub fn open_in_memory(table_name: &str) -> StoreResult<Connection> {
        let conn = Connection::open_in_memory()?;
        Self::apply_pragmas(&conn)?;
        ensure_value_table(&conn, table_name)?;
        Ok(conn)
    }

    fn apply_pragmas(conn: &Connection) -> StoreResult<()> {
        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout=5000;",
        )?;
        Ok(())
    }
}
