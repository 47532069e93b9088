// src/store/widget.rs
// Conversion between stored grids and the rectangular editing form
//
// Column keys and display positions are separate axes: a grid row keeps its
// open column keys, the editable form only knows positions 0..n. Positions are
// assigned by sorting the keys of each row; the original keys are not carried
// into the form and come back as positional indices on write.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use super::cell::{insert_cell, Cell, ColKey, Grid, ItemId};

/// Row id -> values by display position.
pub type EditableForm = BTreeMap<u32, Vec<String>>;

/// Lay out the value rows of a grid as an editing form.
///
/// Every row is padded to the widest row's column count: positional slots
/// `0..max` that the row lacks are filled with empty strings. Each row is then
/// ordered by column key and re-numbered by position.
pub fn to_editable_form(grid: &Grid) -> EditableForm {
    let rows = grid
        .iter()
        .map(|(row_id, cols)| {
            let values = cols
                .iter()
                .map(|(key, cell)| (key.clone(), cell.value.clone()))
                .collect();
            (*row_id, values)
        })
        .collect();
    assign_positions(rows)
}

fn assign_positions(rows: BTreeMap<u32, BTreeMap<ColKey, String>>) -> EditableForm {
    let max_columns = rows.values().map(|cols| cols.len()).max().unwrap_or(0);

    rows.into_iter()
        .map(|(row_id, mut cols)| {
            if cols.len() < max_columns {
                for position in 0..max_columns {
                    cols.entry(ColKey::from(position)).or_default();
                }
            }
            // BTreeMap iteration is the sorted key order.
            (row_id, cols.into_values().collect())
        })
        .collect()
}

/// Turn a submitted editing form back into cells of one item.
/// Empty strings are dropped, so the result only holds values to persist.
pub fn from_editable_form(form: &EditableForm, attribute_id: i64, item_id: &ItemId) -> Grid {
    let mut grid = Grid::new();
    for (row_id, values) in form {
        for (position, value) in values.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            insert_cell(
                &mut grid,
                Cell::new(
                    attribute_id,
                    item_id.clone(),
                    *row_id,
                    ColKey::from(position),
                    value.as_str(),
                ),
            );
        }
    }
    grid
}

/// Entries of a JSON container: object keys, or array indices as keys.
fn entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_value_rows(value: &Value) -> Option<BTreeMap<u32, BTreeMap<ColKey, String>>> {
    let mut rows = BTreeMap::new();
    for (row_key, cols) in entries(value)? {
        let row_id: u32 = row_key.parse().ok()?;
        let mut row = BTreeMap::new();
        for (col_key, cell) in entries(cols)? {
            let text = match cell {
                Value::Object(fields) => fields.get("value").and_then(scalar_text)?,
                other => scalar_text(other)?,
            };
            row.insert(ColKey::parse(&col_key), text);
        }
        rows.insert(row_id, row);
    }
    Some(rows)
}

/// Editing form for a loosely typed stored value, as handed over by a widget
/// host. Anything that is not a grid of cells yields an empty form.
pub fn value_to_widget(value: &Value) -> EditableForm {
    match parse_value_rows(value) {
        Some(rows) => assign_positions(rows),
        None => {
            debug!("Value is not a grid, using an empty editing form");
            EditableForm::new()
        }
    }
}

/// Cells of one item from a loosely typed widget submission.
///
/// Returns `None` when the submission is not an array or object. Rows that are
/// not containers or have a non-numeric id are ignored, as are empty and
/// non-scalar cells.
pub fn widget_to_value(value: &Value, attribute_id: i64, item_id: &ItemId) -> Option<Grid> {
    let rows = entries(value)?;

    let mut grid = Grid::new();
    for (row_key, cols) in rows {
        let Ok(row_id) = row_key.parse::<u32>() else {
            continue;
        };
        let Some(cols) = entries(cols) else {
            continue;
        };
        for (col_key, cell) in cols {
            match scalar_text(cell) {
                Some(text) if !text.is_empty() => insert_cell(
                    &mut grid,
                    Cell::new(attribute_id, item_id.clone(), row_id, ColKey::parse(&col_key), text),
                ),
                _ => {}
            }
        }
    }
    Some(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(row: u32, col: ColKey, value: &str) -> Cell {
        Cell::new(1, ItemId::Int(1), row, col, value)
    }

    fn grid(cells: Vec<Cell>) -> Grid {
        let mut grid = Grid::new();
        for c in cells {
            insert_cell(&mut grid, c);
        }
        grid
    }

    #[test]
    fn test_short_rows_are_padded() {
        let grid = grid(vec![
            cell(0, ColKey::Index(0), "a"),
            cell(1, ColKey::Index(0), "b"),
            cell(1, ColKey::Index(1), "c"),
        ]);
        let form = to_editable_form(&grid);
        assert_eq!(form[&0], vec!["a".to_string(), String::new()]);
        assert_eq!(form[&1], vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_columns_are_sorted_then_numbered() {
        let grid = grid(vec![
            cell(3, ColKey::Index(7), "late"),
            cell(3, ColKey::Index(2), "early"),
        ]);
        let form = to_editable_form(&grid);
        assert_eq!(form[&3], vec!["early".to_string(), "late".to_string()]);
    }

    #[test]
    fn test_padding_only_fills_missing_positions() {
        // Row 0 holds keys 0 and 5; the widest row has three columns, so
        // positions 1 and 2 are added next to the existing keys.
        let grid = grid(vec![
            cell(0, ColKey::Index(0), "a"),
            cell(1, ColKey::Index(0), "x"),
            cell(1, ColKey::Index(1), "y"),
            cell(1, ColKey::Index(2), "z"),
            cell(0, ColKey::Index(5), "f"),
        ]);
        let form = to_editable_form(&grid);
        assert_eq!(form[&0], vec!["a", "", "", "f"]);
        assert_eq!(form[&1], vec!["x", "y", "z"]);
    }

    #[test]
    fn test_empty_grid_gives_empty_form() {
        assert!(to_editable_form(&Grid::new()).is_empty());
    }

    #[test]
    fn test_from_editable_form_drops_empty_strings() {
        let mut form = EditableForm::new();
        form.insert(0, vec!["a".into(), String::new(), "c".into()]);
        form.insert(4, vec![String::new()]);

        let grid = from_editable_form(&form, 3, &ItemId::Int(8));
        assert_eq!(grid.len(), 1);
        let row = &grid[&0];
        assert_eq!(row.keys().cloned().collect::<Vec<_>>(), vec![ColKey::Index(0), ColKey::Index(2)]);
        assert_eq!(row[&ColKey::Index(2)].value, "c");
        assert_eq!(row[&ColKey::Index(2)].attribute_id, 3);
        assert_eq!(row[&ColKey::Index(2)].item_id, ItemId::Int(8));
    }

    #[test]
    fn test_value_to_widget_reads_cell_objects() {
        let value = json!({
            "0": {"0": {"value": "a", "row": 0}},
            "1": {"0": {"value": "b", "row": 1}, "1": {"value": "c", "row": 1}}
        });
        let form = value_to_widget(&value);
        assert_eq!(form[&0], vec!["a", ""]);
        assert_eq!(form[&1], vec!["b", "c"]);
    }

    #[test]
    fn test_value_to_widget_recovers_from_malformed_input() {
        assert!(value_to_widget(&json!("text")).is_empty());
        assert!(value_to_widget(&json!(null)).is_empty());
        assert!(value_to_widget(&json!({"0": "not a row"})).is_empty());
        assert!(value_to_widget(&json!({"x": {"0": {"value": "a"}}})).is_empty());
    }

    #[test]
    fn test_widget_to_value_accepts_arrays_and_objects() {
        let value = json!([["a", "", "c"], {"1": "d"}]);
        let grid = widget_to_value(&value, 1, &ItemId::Int(2)).unwrap();
        assert_eq!(grid[&0].len(), 2);
        assert_eq!(grid[&0][&ColKey::Index(2)].value, "c");
        assert_eq!(grid[&1][&ColKey::Index(1)].value, "d");
    }

    #[test]
    fn test_widget_to_value_rejects_scalars() {
        assert!(widget_to_value(&json!("a"), 1, &ItemId::Int(2)).is_none());
        assert!(widget_to_value(&json!(null), 1, &ItemId::Int(2)).is_none());
        assert_eq!(widget_to_value(&json!([]), 1, &ItemId::Int(2)), Some(Grid::new()));
    }
}
