//! Translated table text attribute: a value store for sparse row/column text
//! grids kept per content item and language, with fallback-language reads and
//! conversion to and from a rectangular editing form.

pub mod attribute;
pub mod settings;
pub mod store;

pub use attribute::{AttributeSettings, AttributeTypeRegistry, ContentModel, LanguagePair};
pub use store::{
    Cell, ColKey, EditableForm, Grid, ItemGrids, ItemId, ItemSelection, StoreError, StoreResult,
    TranslatedTableStore,
};
