// src/store/writer/upserts.rs
// Upsert operations - flattening item grids into per-cell writes

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{debug, info, trace};

use crate::store::cell::ItemGrids;
use crate::store::error::StoreResult;
use crate::store::helpers::build_upsert_sql;

/// Outcome of one batch write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    pub skipped_empty: usize,
}

/// Upsert every non-empty cell of `values` under `language`.
///
/// The item id comes from the map key, row and column from the cell itself.
/// Empty values are skipped and leave any stored cell at that key untouched.
/// Each cell is one `INSERT .. ON CONFLICT DO UPDATE`, so re-running the same
/// batch changes nothing but timestamps. The batch runs in its own transaction
/// unless the caller already holds one on `conn`, in which case the upserts
/// join the caller's transaction and commit or roll back with it.
pub fn write_for_language(
    conn: &Connection,
    table_name: &str,
    attribute_id: i64,
    values: &ItemGrids,
    language: &str,
) -> StoreResult<WriteSummary> {
    let tstamp = Utc::now().timestamp();
    let mut summary = WriteSummary::default();

    let tx = if conn.is_autocommit() {
        Some(conn.unchecked_transaction()?)
    } else {
        debug!("Writing attribute {} cells inside the caller's transaction", attribute_id);
        None
    };
    {
        let mut stmt = conn.prepare(&build_upsert_sql(table_name))?;
        for (item_id, grid) in values {
            for row in grid.values() {
                for cell in row.values() {
                    if cell.is_empty() {
                        trace!(
                            "Skipping empty cell {}/{} of item {}",
                            cell.row, cell.col, item_id
                        );
                        summary.skipped_empty += 1;
                        continue;
                    }
                    stmt.execute(params![
                        attribute_id,
                        item_id,
                        cell.row,
                        cell.col,
                        language,
                        cell.value,
                        tstamp
                    ])?;
                    summary.written += 1;
                }
            }
        }
    }
    if let Some(tx) = tx {
        tx.commit()?;
    }

    info!(
        "Wrote {} cells ({} empty skipped) for {} items of attribute {} in '{}'",
        summary.written,
        summary.skipped_empty,
        values.len(),
        attribute_id,
        language
    );
    Ok(summary)
}
