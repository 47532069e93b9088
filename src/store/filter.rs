// src/store/filter.rs
// WHERE clause builder shared by the read, write and delete paths

use rusqlite::ToSql;

use super::cell::{ColKey, ItemId};
use super::helpers::build_placeholders;

/// Which items an operation addresses.
///
/// Callers may hand over a single id or a collection; both narrow the query.
/// `All` and an empty `Many` leave the item column unfiltered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelection {
    All,
    Single(ItemId),
    Many(Vec<ItemId>),
}

impl ItemSelection {
    /// True for selections that were given as a collection of ids.
    pub fn is_collection(&self) -> bool {
        matches!(self, ItemSelection::Many(_))
    }

    /// True when the selection names no item at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ItemSelection::All => true,
            ItemSelection::Single(_) => false,
            ItemSelection::Many(ids) => ids.is_empty(),
        }
    }

    pub fn ids(&self) -> &[ItemId] {
        match self {
            ItemSelection::All => &[],
            ItemSelection::Single(id) => std::slice::from_ref(id),
            ItemSelection::Many(ids) => ids,
        }
    }
}

impl From<ItemId> for ItemSelection {
    fn from(id: ItemId) -> Self {
        ItemSelection::Single(id)
    }
}

impl From<Vec<ItemId>> for ItemSelection {
    fn from(ids: Vec<ItemId>) -> Self {
        ItemSelection::Many(ids)
    }
}

impl From<&[ItemId]> for ItemSelection {
    fn from(ids: &[ItemId]) -> Self {
        ItemSelection::Many(ids.to_vec())
    }
}

/// A rendered WHERE clause together with its positional parameters.
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<Box<dyn ToSql>>,
}

impl WhereClause {
    pub fn bind(&self) -> rusqlite::ParamsFromIter<std::slice::Iter<'_, Box<dyn ToSql>>> {
        rusqlite::params_from_iter(self.params.iter())
    }
}

/// Builder for the value-table filter. Every clause is scoped to one attribute.
#[derive(Debug, Clone)]
pub struct CellFilter<'a> {
    attribute_id: i64,
    items: &'a ItemSelection,
    language: Option<&'a str>,
    cell: Option<(u32, &'a ColKey)>,
}

impl<'a> CellFilter<'a> {
    pub fn new(attribute_id: i64, items: &'a ItemSelection) -> Self {
        Self {
            attribute_id,
            items,
            language: None,
            cell: None,
        }
    }

    /// Restrict to exactly one language code, including the empty code.
    /// Only `None` leaves the language unfiltered.
    pub fn language(mut self, language: Option<&'a str>) -> Self {
        self.language = language;
        self
    }

    /// Restrict to a single cell position.
    pub fn cell(mut self, row: u32, col: &'a ColKey) -> Self {
        self.cell = Some((row, col));
        self
    }

    pub fn build(&self) -> WhereClause {
        let mut clauses = vec!["att_id = ?".to_string()];
        let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(self.attribute_id)];

        match self.items {
            ItemSelection::Single(id) => {
                clauses.push("item_id = ?".to_string());
                params.push(Box::new(id.clone()));
            }
            ItemSelection::Many(ids) if !ids.is_empty() => {
                clauses.push(format!("item_id IN ({})", build_placeholders(ids.len())));
                for id in ids {
                    params.push(Box::new(id.clone()));
                }
            }
            _ => {}
        }

        if let Some((row, col)) = self.cell {
            clauses.push("\"row\" = ? AND \"col\" = ?".to_string());
            params.push(Box::new(row));
            params.push(Box::new(col.clone()));
        }

        if let Some(language) = self.language {
            clauses.push("langcode = ?".to_string());
            params.push(Box::new(language.to_string()));
        }

        WhereClause {
            sql: clauses.join(" AND "),
            params,
        }
    }
}
