// src/store/reader/mod.rs
// Read path - value table queries grouped into per-item grids

mod fallback;

pub use fallback::{merge_fallback, resolve_with_fallback};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::debug;

use super::cell::{insert_cell, Cell, ColKey, ItemGrids, ItemId};
use super::error::StoreResult;
use super::filter::{CellFilter, ItemSelection};
use super::helpers::build_select_sql;

/// Map a row of `build_select_sql` output to a cell.
fn row_to_cell(row: &Row<'_>) -> rusqlite::Result<Cell> {
    let tstamp: i64 = row.get(6)?;
    Ok(Cell {
        attribute_id: row.get(0)?,
        item_id: row.get(1)?,
        row: row.get(2)?,
        col: row.get(3)?,
        language: Some(row.get(4)?),
        value: row.get(5)?,
        last_modified: DateTime::<Utc>::from_timestamp(tstamp, 0),
    })
}

/// Load all cells of one attribute in `language` for the selected items,
/// grouped by item, row and column.
pub fn read_for_items(
    conn: &Connection,
    table_name: &str,
    attribute_id: i64,
    items: &ItemSelection,
    language: &str,
) -> StoreResult<ItemGrids> {
    let clause = CellFilter::new(attribute_id, items)
        .language(Some(language))
        .build();
    let mut stmt = conn.prepare(&build_select_sql(table_name, &clause.sql))?;

    let mut grids = ItemGrids::new();
    let mut cells = 0usize;
    for cell in stmt.query_map(clause.bind(), row_to_cell)? {
        let cell = cell?;
        cells += 1;
        insert_cell(grids.entry(cell.item_id.clone()).or_default(), cell);
    }

    debug!(
        "Read {} cells for {} items of attribute {} in '{}'",
        cells,
        grids.len(),
        attribute_id,
        language
    );
    Ok(grids)
}

/// Load a single cell, if present.
pub fn read_cell(
    conn: &Connection,
    table_name: &str,
    attribute_id: i64,
    item_id: &ItemId,
    row: u32,
    col: &ColKey,
    language: &str,
) -> StoreResult<Option<Cell>> {
    let items = ItemSelection::Single(item_id.clone());
    let clause = CellFilter::new(attribute_id, &items)
        .cell(row, col)
        .language(Some(language))
        .build();
    let cell = conn
        .query_row(&build_select_sql(table_name, &clause.sql), clause.bind(), row_to_cell)
        .optional()?;
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_helpers::{seed_cell, setup_value_table};

    #[test]
    fn test_read_groups_by_item_row_and_col() {
        let conn = setup_value_table();
        seed_cell(&conn, 1, ItemId::Int(10), 1, ColKey::Index(0), "en", "b0");
        seed_cell(&conn, 1, ItemId::Int(10), 0, ColKey::Index(1), "en", "a1");
        seed_cell(&conn, 1, ItemId::Int(10), 0, ColKey::Index(0), "en", "a0");
        seed_cell(&conn, 1, ItemId::Int(11), 0, ColKey::Index(0), "en", "other");

        let grids = read_for_items(
            &conn,
            "cells",
            1,
            &ItemSelection::Many(vec![ItemId::Int(10)]),
            "en",
        )
        .unwrap();

        assert_eq!(grids.len(), 1);
        let grid = &grids[&ItemId::Int(10)];
        let first_row: Vec<&str> = grid[&0].values().map(|c| c.value.as_str()).collect();
        assert_eq!(first_row, vec!["a0", "a1"]);
        assert_eq!(grid[&1][&ColKey::Index(0)].value, "b0");
        assert_eq!(grid[&1][&ColKey::Index(0)].language.as_deref(), Some("en"));
        assert!(grid[&1][&ColKey::Index(0)].last_modified.is_some());
    }

    #[test]
    fn test_read_is_scoped_to_attribute_and_language() {
        let conn = setup_value_table();
        seed_cell(&conn, 1, ItemId::Int(10), 0, ColKey::Index(0), "en", "mine");
        seed_cell(&conn, 2, ItemId::Int(10), 0, ColKey::Index(0), "en", "foreign");
        seed_cell(&conn, 1, ItemId::Int(10), 0, ColKey::Index(0), "et", "minu");

        let grids = read_for_items(&conn, "cells", 1, &ItemSelection::All, "en").unwrap();
        assert_eq!(grids[&ItemId::Int(10)][&0][&ColKey::Index(0)].value, "mine");
        assert_eq!(crate::store::cell::cell_count(&grids[&ItemId::Int(10)]), 1);
    }

    #[test]
    fn test_blank_language_reads_only_untagged_cells() {
        let conn = setup_value_table();
        seed_cell(&conn, 1, ItemId::Int(10), 0, ColKey::Index(0), "en", "en");
        seed_cell(&conn, 1, ItemId::Int(10), 0, ColKey::Index(0), "et", "et");

        let grids = read_for_items(&conn, "cells", 1, &ItemSelection::All, "").unwrap();
        assert!(grids.is_empty());

        seed_cell(&conn, 1, ItemId::Int(10), 0, ColKey::Index(0), "", "blank");
        let grids = read_for_items(&conn, "cells", 1, &ItemSelection::All, "").unwrap();
        assert_eq!(grids[&ItemId::Int(10)][&0][&ColKey::Index(0)].value, "blank");
        assert_eq!(crate::store::cell::cell_count(&grids[&ItemId::Int(10)]), 1);
    }

    #[test]
    fn test_read_accepts_single_scalar_id() {
        let conn = setup_value_table();
        seed_cell(&conn, 1, ItemId::Str("page".into()), 0, ColKey::Name("size".into()), "en", "XL");
        seed_cell(&conn, 1, ItemId::Int(3), 0, ColKey::Index(0), "en", "other");

        let grids = read_for_items(
            &conn,
            "cells",
            1,
            &ItemSelection::Single(ItemId::Str("page".into())),
            "en",
        )
        .unwrap();
        assert_eq!(grids.keys().collect::<Vec<_>>(), vec![&ItemId::Str("page".into())]);
    }

    #[test]
    fn test_read_cell() {
        let conn = setup_value_table();
        seed_cell(&conn, 1, ItemId::Int(10), 2, ColKey::Index(1), "en", "x");

        let hit = read_cell(&conn, "cells", 1, &ItemId::Int(10), 2, &ColKey::Index(1), "en").unwrap();
        assert_eq!(hit.map(|c| c.value), Some("x".to_string()));

        let miss = read_cell(&conn, "cells", 1, &ItemId::Int(10), 2, &ColKey::Index(1), "et").unwrap();
        assert!(miss.is_none());
    }
}
