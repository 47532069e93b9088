// src/store/schema.rs
// Value table creation and existence checks

use rusqlite::Connection;
use tracing::{debug, info};

use super::error::StoreResult;
use super::helpers::quote_identifier;

/// Default name of the table holding translated table text cells.
pub const DEFAULT_VALUE_TABLE: &str = "tl_metamodel_translatedtabletext";

/// Check if a table exists in the database
pub fn table_exists(conn: &Connection, table_name: &str) -> StoreResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Create the value table and its lookup index if they do not exist yet.
///
/// `item_id` and `col` are declared without a type so SQLite keeps integers
/// and strings in their own storage class. Both statements run every time, so
/// a table created without the lookup index gets it added.
pub fn ensure_value_table(conn: &Connection, table_name: &str) -> StoreResult<()> {
    let existed = table_exists(conn, table_name)?;

    let table = quote_identifier(table_name);
    let index = lookup_index_name(table_name);
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tstamp INTEGER NOT NULL DEFAULT 0,
            att_id INTEGER NOT NULL,
            item_id NOT NULL,
            \"row\" INTEGER NOT NULL,
            \"col\" NOT NULL,
            langcode TEXT NOT NULL,
            value TEXT NOT NULL DEFAULT '',
            UNIQUE (att_id, item_id, \"row\", \"col\", langcode)
        );
        CREATE INDEX IF NOT EXISTS {index} ON {table}(att_id, item_id, langcode);"
    ))?;

    if existed {
        debug!("Value table '{}' already present", table_name);
    } else {
        info!("Created value table '{}'", table_name);
    }
    Ok(())
}

/// Quoted name of the lookup index of `table_name`. The table name is kept
/// verbatim, so distinct tables never share an index name.
pub fn lookup_index_name(table_name: &str) -> String {
    quote_identifier(&raw_lookup_index_name(table_name))
}

fn raw_lookup_index_name(table_name: &str) -> String {
    format!("idx_{}_lookup", table_name)
}

fn index_exists(conn: &Connection, index_name: &str) -> StoreResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?",
        [index_name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// True when the lookup index of `table_name` is present.
pub fn lookup_index_exists(conn: &Connection, table_name: &str) -> StoreResult<bool> {
    index_exists(conn, &raw_lookup_index_name(table_name))
}
