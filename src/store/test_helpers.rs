// src/store/test_helpers.rs
// Test utilities for value table tests

#![cfg(test)]

use rusqlite::{params, Connection};

use super::cell::{ColKey, ItemId};
use super::schema::ensure_value_table;

/// Set up an in-memory database holding an empty value table named `cells`.
///
/// # Example
/// ```ignore
/// let conn = setup_value_table();
/// seed_cell(&conn, 1, ItemId::Int(1), 0, ColKey::Index(0), "en", "a");
/// ```
pub fn setup_value_table() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    ensure_value_table(&conn, "cells").unwrap();
    conn
}

/// Insert one cell directly, bypassing the writer.
pub fn seed_cell(
    conn: &Connection,
    attribute_id: i64,
    item_id: ItemId,
    row: u32,
    col: ColKey,
    language: &str,
    value: &str,
) {
    conn.execute(
        "INSERT INTO cells (tstamp, att_id, item_id, \"row\", \"col\", langcode, value)
         VALUES (1700000000, ?1, ?2, ?3, ?4, ?5, ?6)",
        params![attribute_id, item_id, row, col, language, value],
    )
    .unwrap();
}

/// Number of rows in the `cells` table, across attributes and languages.
pub fn count_cells(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM cells", [], |row| row.get(0))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_and_count() {
        let conn = setup_value_table();
        assert_eq!(count_cells(&conn), 0);
        seed_cell(&conn, 1, ItemId::Int(1), 0, ColKey::Index(0), "en", "a");
        assert_eq!(count_cells(&conn), 1);
    }
}
