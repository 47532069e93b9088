// src/cli/widget.rs
use translated_tabletext::attribute::LanguagePair;
use translated_tabletext::store::{ItemId, StoreResult, TranslatedTableStore};

pub fn run(store: &TranslatedTableStore<'_>, languages: &LanguagePair, id: &str) -> StoreResult<()> {
    let item_id = ItemId::parse(id);
    let mut grids = store.get_data_for(std::slice::from_ref(&item_id), languages)?;
    let grid = grids.remove(&item_id).unwrap_or_default();
    let form = store.to_editable_form(&grid);

    if form.is_empty() {
        println!("Item {} has no values", item_id);
        return Ok(());
    }
    for (row, values) in &form {
        println!("{:<4} {}", row, values.join(" | "));
    }
    Ok(())
}
