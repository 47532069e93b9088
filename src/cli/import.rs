// src/cli/import.rs
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use translated_tabletext::attribute::LanguagePair;
use translated_tabletext::store::cell::insert_cell;
use translated_tabletext::store::{Cell, ColKey, Grid, ItemGrids, ItemId, StoreResult, TranslatedTableStore};

/// Import file layout: item id -> row -> column key -> value.
pub type ImportFile = BTreeMap<ItemId, BTreeMap<u32, BTreeMap<ColKey, String>>>;

pub fn to_item_grids(attribute_id: i64, file: ImportFile) -> ItemGrids {
    file.into_iter()
        .map(|(item_id, rows)| {
            let mut grid = Grid::new();
            for (row, cols) in rows {
                for (col, value) in cols {
                    insert_cell(&mut grid, Cell::new(attribute_id, item_id.clone(), row, col, value));
                }
            }
            (item_id, grid)
        })
        .collect()
}

pub fn run(store: &TranslatedTableStore<'_>, languages: &LanguagePair, path: &Path) -> StoreResult<()> {
    let reader = BufReader::new(File::open(path)?);
    let file: ImportFile = serde_json::from_reader(reader)?;
    let values = to_item_grids(store.attribute_id(), file);
    let summary = store.set_data_for(&values, languages)?;
    println!(
        "Imported {} cells into '{}' ({} empty skipped)",
        summary.written, languages.active, summary.skipped_empty
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_file_maps_to_grids() {
        let file: ImportFile =
            serde_json::from_str(r#"{"7": {"0": {"0": "a", "unit": "cm"}}, "page": {"2": {"1": ""}}}"#)
                .unwrap();
        let grids = to_item_grids(5, file);

        let seven = &grids[&ItemId::Int(7)];
        assert_eq!(seven[&0][&ColKey::Name("unit".into())].value, "cm");
        assert_eq!(seven[&0][&ColKey::Index(0)].attribute_id, 5);
        assert!(grids[&ItemId::Str("page".into())][&2][&ColKey::Index(1)].is_empty());
    }
}
