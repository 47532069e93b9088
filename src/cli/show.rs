// src/cli/show.rs
use translated_tabletext::attribute::LanguagePair;
use translated_tabletext::store::{ItemId, StoreResult, TranslatedTableStore};

pub fn parse_ids(ids: &[String]) -> Vec<ItemId> {
    ids.iter().map(|id| ItemId::parse(id)).collect()
}

pub fn run(
    store: &TranslatedTableStore<'_>,
    languages: &LanguagePair,
    ids: &[String],
    no_fallback: bool,
) -> StoreResult<()> {
    let ids = parse_ids(ids);
    let grids = if no_fallback {
        store.read_for_items(ids, &languages.active)?
    } else {
        store.get_data_for(&ids, languages)?
    };
    println!("{}", serde_json::to_string_pretty(&grids)?);
    Ok(())
}
