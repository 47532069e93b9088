// src/store/writer/deletions.rs
// Deletion operations - removing cells of selected items

use rusqlite::Connection;
use tracing::{debug, info};

use crate::store::error::StoreResult;
use crate::store::filter::{CellFilter, ItemSelection};
use crate::store::helpers::build_delete_sql;

/// Delete the cells of the selected items, in one language or in all.
///
/// A selection naming no item deletes nothing; it never widens to the whole
/// attribute. Returns the number of removed cells.
pub fn delete_for_items(
    conn: &Connection,
    table_name: &str,
    attribute_id: i64,
    items: &ItemSelection,
    language: Option<&str>,
) -> StoreResult<usize> {
    if items.is_empty() {
        debug!("Delete for attribute {} called without item ids, nothing to do", attribute_id);
        return Ok(0);
    }

    let clause = CellFilter::new(attribute_id, items).language(language).build();
    let removed = conn.execute(&build_delete_sql(table_name, &clause.sql), clause.bind())?;

    info!(
        "Deleted {} cells of {} items for attribute {} ({})",
        removed,
        items.ids().len(),
        attribute_id,
        language.unwrap_or("all languages")
    );
    Ok(removed)
}
