// src/cli/unset.rs
use translated_tabletext::store::{StoreResult, TranslatedTableStore};

use super::show::parse_ids;

pub fn run(store: &TranslatedTableStore<'_>, ids: &[String], only_lang: Option<&str>) -> StoreResult<()> {
    let ids = parse_ids(ids);
    let removed = match only_lang {
        Some(lang) => store.delete_for_items(ids, Some(lang))?,
        None => store.unset_data_for(ids)?,
    };
    println!("Removed {} cells", removed);
    Ok(())
}
