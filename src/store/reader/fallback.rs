// src/store/reader/fallback.rs
// Language fallback resolution for items missing in the active language

use std::collections::BTreeSet;
use tracing::{debug, trace};

use crate::store::cell::{ItemGrids, ItemId};
use crate::store::error::StoreResult;
use crate::store::filter::ItemSelection;

/// Read `ids` in `active`, then fill unresolved items from `fallback`.
///
/// `load` performs one query for a selection and a language. The fallback
/// query is skipped when every item resolved or both languages are equal.
pub fn resolve_with_fallback<F>(
    ids: &[ItemId],
    active: &str,
    fallback: &str,
    mut load: F,
) -> StoreResult<ItemGrids>
where
    F: FnMut(&ItemSelection, &str) -> StoreResult<ItemGrids>,
{
    let requested: BTreeSet<&ItemId> = ids.iter().collect();
    if requested.is_empty() {
        return Ok(ItemGrids::new());
    }

    let selection = ItemSelection::Many(requested.iter().map(|id| (*id).clone()).collect());
    let mut resolved = load(&selection, active)?;

    if resolved.len() >= requested.len() || active == fallback {
        return Ok(resolved);
    }

    let missing: Vec<ItemId> = requested
        .into_iter()
        .filter(|id| resolved.get(*id).map_or(true, |grid| grid.is_empty()))
        .cloned()
        .collect();
    if missing.is_empty() {
        return Ok(resolved);
    }

    debug!(
        "{} items missing in '{}', reading fallback language '{}'",
        missing.len(),
        active,
        fallback
    );
    let fallback_grids = load(&ItemSelection::Many(missing), fallback)?;
    merge_fallback(&mut resolved, fallback_grids);
    Ok(resolved)
}

/// Add fallback grids for items that have no cell in `resolved`.
/// Items holding at least one active-language cell are never replaced.
pub fn merge_fallback(resolved: &mut ItemGrids, fallback: ItemGrids) {
    for (item_id, grid) in fallback {
        match resolved.get(&item_id) {
            Some(existing) if !existing.is_empty() => {
                trace!("Keeping active-language value of item {}", item_id);
            }
            _ => {
                resolved.insert(item_id, grid);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::cell::{insert_cell, Cell, ColKey, Grid};

    fn grid_with(item: ItemId, value: &str) -> Grid {
        let mut grid = Grid::new();
        insert_cell(&mut grid, Cell::new(1, item, 0, ColKey::Index(0), value));
        grid
    }

    #[test]
    fn test_empty_request_issues_no_query() {
        let mut calls = 0;
        let result = resolve_with_fallback(&[], "en", "et", |_, _| {
            calls += 1;
            Ok(ItemGrids::new())
        })
        .unwrap();
        assert!(result.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_same_language_issues_single_query() {
        let mut languages = Vec::new();
        let ids = vec![ItemId::Int(1), ItemId::Int(2)];
        resolve_with_fallback(&ids, "en", "en", |_, lang| {
            languages.push(lang.to_string());
            Ok(ItemGrids::new())
        })
        .unwrap();
        assert_eq!(languages, vec!["en"]);
    }

    #[test]
    fn test_fallback_only_queries_missing_items() {
        let a = ItemId::Int(1);
        let b = ItemId::Int(2);
        let ids = vec![a.clone(), b.clone()];
        let mut fallback_selection = None;

        let result = resolve_with_fallback(&ids, "en", "et", |selection, lang| {
            let mut grids = ItemGrids::new();
            if lang == "en" {
                grids.insert(a.clone(), grid_with(a.clone(), "a-en"));
            } else {
                fallback_selection = Some(selection.clone());
                for id in selection.ids() {
                    grids.insert(id.clone(), grid_with(id.clone(), "et"));
                }
            }
            Ok(grids)
        })
        .unwrap();

        assert_eq!(fallback_selection, Some(ItemSelection::Many(vec![b.clone()])));
        assert_eq!(result[&a][&0][&ColKey::Index(0)].value, "a-en");
        assert_eq!(result[&b][&0][&ColKey::Index(0)].value, "et");
    }

    #[test]
    fn test_all_resolved_skips_fallback() {
        let a = ItemId::Int(1);
        let mut calls = 0;
        resolve_with_fallback(&[a.clone(), a.clone()], "en", "et", |_, _| {
            calls += 1;
            let mut grids = ItemGrids::new();
            grids.insert(a.clone(), grid_with(a.clone(), "x"));
            Ok(grids)
        })
        .unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_merge_never_overwrites_present_items() {
        let a = ItemId::Int(1);
        let mut resolved = ItemGrids::new();
        resolved.insert(a.clone(), grid_with(a.clone(), "active"));

        let mut fallback = ItemGrids::new();
        fallback.insert(a.clone(), grid_with(a.clone(), "fallback"));
        fallback.insert(ItemId::Int(2), grid_with(ItemId::Int(2), "fallback"));

        merge_fallback(&mut resolved, fallback);
        assert_eq!(resolved[&a][&0][&ColKey::Index(0)].value, "active");
        assert!(resolved.contains_key(&ItemId::Int(2)));
    }
}
