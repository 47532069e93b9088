// src/store/mod.rs

pub mod cell;
pub mod connection;
pub mod error;
pub mod filter;
pub mod helpers;
pub mod reader;
pub mod schema;
pub mod widget;
pub mod writer;

mod test_helpers;

pub use cell::{Cell, ColKey, Grid, ItemGrids, ItemId};
pub use connection::DbConnection;
pub use error::{StoreError, StoreResult};
pub use filter::ItemSelection;
pub use widget::EditableForm;
pub use writer::WriteSummary;

use rusqlite::Connection;
use std::collections::BTreeMap;
use tracing::debug;

use crate::attribute::{AttributeSettings, ContentModel};

/// Value store of one translated table text attribute.
///
/// Persists the sparse row/column grid of each item per language in the
/// attribute's value table and resolves missing translations through the
/// fallback language on read. Every query is scoped to the attribute id.
///
/// The store borrows the connection; it keeps no cache, so every read hits
/// the database.
#[derive(Debug)]
pub struct TranslatedTableStore<'c> {
    conn: &'c Connection,
    settings: AttributeSettings,
}

impl<'c> TranslatedTableStore<'c> {
    pub fn new(conn: &'c Connection, settings: AttributeSettings) -> Self {
        Self { conn, settings }
    }

    pub fn attribute_id(&self) -> i64 {
        self.settings.id
    }

    pub fn settings(&self) -> &AttributeSettings {
        &self.settings
    }

    pub fn value_table(&self) -> &str {
        &self.settings.value_table
    }

    // ============================================================================
    // READS - See reader/
    // ============================================================================

    /// Cells of the selected items in exactly `language`.
    pub fn read_for_items(
        &self,
        items: impl Into<ItemSelection>,
        language: &str,
    ) -> StoreResult<ItemGrids> {
        reader::read_for_items(
            self.conn,
            self.value_table(),
            self.attribute_id(),
            &items.into(),
            language,
        )
    }

    /// Cells of `ids` in `active`, with items lacking any active-language cell
    /// taken from `fallback`.
    pub fn read_with_fallback(
        &self,
        ids: &[ItemId],
        active: &str,
        fallback: &str,
    ) -> StoreResult<ItemGrids> {
        reader::resolve_with_fallback(ids, active, fallback, |selection, language| {
            reader::read_for_items(
                self.conn,
                self.value_table(),
                self.attribute_id(),
                selection,
                language,
            )
        })
    }

    /// Single cell lookup.
    pub fn read_cell(
        &self,
        item_id: &ItemId,
        row: u32,
        col: &ColKey,
        language: &str,
    ) -> StoreResult<Option<Cell>> {
        reader::read_cell(
            self.conn,
            self.value_table(),
            self.attribute_id(),
            item_id,
            row,
            col,
            language,
        )
    }

    /// Values of `ids` in the content model's active language, falling back to
    /// its fallback language.
    pub fn get_data_for(&self, ids: &[ItemId], model: &dyn ContentModel) -> StoreResult<ItemGrids> {
        self.read_with_fallback(ids, model.active_language(), model.fallback_language())
    }

    // ============================================================================
    // WRITES - See writer/
    // ============================================================================

    /// Upsert the non-empty cells of `values` under `language`. Cells not in
    /// the batch, and cells submitted empty, keep their stored value.
    pub fn write_for_language(&self, values: &ItemGrids, language: &str) -> StoreResult<WriteSummary> {
        writer::write_for_language(
            self.conn,
            self.value_table(),
            self.attribute_id(),
            values,
            language,
        )
    }

    /// Write `values` in the content model's active language.
    pub fn set_data_for(&self, values: &ItemGrids, model: &dyn ContentModel) -> StoreResult<WriteSummary> {
        self.write_for_language(values, model.active_language())
    }

    /// Delete the cells of the selected items in `language`, or in every
    /// language when none is given. An empty selection deletes nothing.
    pub fn delete_for_items(
        &self,
        items: impl Into<ItemSelection>,
        language: Option<&str>,
    ) -> StoreResult<usize> {
        writer::delete_for_items(
            self.conn,
            self.value_table(),
            self.attribute_id(),
            &items.into(),
            language,
        )
    }

    /// Remove all values of the given items, in every language.
    ///
    /// Only a collection of ids is accepted; a single scalar id is rejected
    /// before anything is deleted.
    pub fn unset_data_for(&self, items: impl Into<ItemSelection>) -> StoreResult<usize> {
        let items = items.into();
        if !items.is_collection() {
            return Err(StoreError::InvalidItemIds(format!(
                "unset_data_for on attribute {} needs a collection of item ids, got {:?}",
                self.attribute_id(),
                items
            )));
        }
        self.delete_for_items(items, None)
    }

    // ============================================================================
    // WIDGET CONVERSION - See widget.rs
    // ============================================================================

    pub fn to_editable_form(&self, grid: &Grid) -> EditableForm {
        widget::to_editable_form(grid)
    }

    pub fn from_editable_form(&self, form: &EditableForm, item_id: &ItemId) -> Grid {
        widget::from_editable_form(form, self.attribute_id(), item_id)
    }

    pub fn value_to_widget(&self, value: &serde_json::Value) -> EditableForm {
        widget::value_to_widget(value)
    }

    pub fn widget_to_value(&self, value: &serde_json::Value, item_id: &ItemId) -> Option<Grid> {
        widget::widget_to_value(value, self.attribute_id(), item_id)
    }

    // ============================================================================
    // SEARCH AND FILTERING - not supported by this attribute type
    // ============================================================================

    /// Full-text search is not offered for table text; always empty.
    pub fn search_in_languages(&self, pattern: &str, languages: &[&str]) -> Vec<ItemId> {
        debug!(
            "Search for '{}' in {:?} on attribute {} returns no items",
            pattern,
            languages,
            self.attribute_id()
        );
        Vec::new()
    }

    /// Filter options are not offered for table text; always empty.
    pub fn filter_options(&self, _ids: Option<&[ItemId]>, _used_only: bool) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}
