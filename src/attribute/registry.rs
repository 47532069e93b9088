// src/attribute/registry.rs
// Attribute type registry: maps a type tag to the constructor of its store

use rusqlite::Connection;
use std::collections::BTreeMap;
use tracing::debug;

use super::AttributeSettings;
use crate::store::{StoreError, StoreResult, TranslatedTableStore};

/// Type tag of the translated simple table attribute.
pub const TRANSLATED_SIMPLE_TABLE: &str = "translatedsimpletable";

const TRANSLATED_SIMPLE_TABLE_ICON: &str =
    "bundles/metamodelsattributetranslatedsimpletable/translatedtabletext.png";

pub type Constructor = for<'c> fn(&'c Connection, AttributeSettings) -> TranslatedTableStore<'c>;

fn translated_simple_table<'c>(
    conn: &'c Connection,
    settings: AttributeSettings,
) -> TranslatedTableStore<'c> {
    TranslatedTableStore::new(conn, settings)
}

/// Registration entry of one attribute type.
#[derive(Clone)]
pub struct AttributeTypeInfo {
    pub type_name: &'static str,
    pub type_icon: &'static str,
    constructor: Constructor,
}

impl AttributeTypeInfo {
    pub fn new(type_name: &'static str, type_icon: &'static str, constructor: Constructor) -> Self {
        Self {
            type_name,
            type_icon,
            constructor,
        }
    }
}

impl std::fmt::Debug for AttributeTypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeTypeInfo")
            .field("type_name", &self.type_name)
            .field("type_icon", &self.type_icon)
            .finish()
    }
}

#[derive(Debug)]
pub struct AttributeTypeRegistry {
    types: BTreeMap<&'static str, AttributeTypeInfo>,
}

impl Default for AttributeTypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(AttributeTypeInfo::new(
            TRANSLATED_SIMPLE_TABLE,
            TRANSLATED_SIMPLE_TABLE_ICON,
            translated_simple_table,
        ));
        registry
    }
}

impl AttributeTypeRegistry {
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Register a type, replacing an earlier registration under the same tag.
    pub fn register(&mut self, info: AttributeTypeInfo) {
        debug!("Registering attribute type '{}'", info.type_name);
        self.types.insert(info.type_name, info);
    }

    pub fn get(&self, type_name: &str) -> Option<&AttributeTypeInfo> {
        self.types.get(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    /// Build the store for an attribute of the given type over `conn`.
    pub fn create_instance<'c>(
        &self,
        type_name: &str,
        conn: &'c Connection,
        settings: AttributeSettings,
    ) -> StoreResult<TranslatedTableStore<'c>> {
        let info = self
            .get(type_name)
            .ok_or_else(|| StoreError::UnknownAttributeType(type_name.to_string()))?;
        Ok((info.constructor)(conn, settings))
    }
}
