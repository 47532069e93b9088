// src/attribute/mod.rs
// Attribute definition, content-model language seam and type registry

mod registry;

pub use registry::{AttributeTypeInfo, AttributeTypeRegistry, TRANSLATED_SIMPLE_TABLE};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::store::schema::DEFAULT_VALUE_TABLE;

/// Setting keys every attribute understands.
const BASE_SETTING_NAMES: [&str; 9] = [
    "id",
    "pid",
    "tstamp",
    "name",
    "description",
    "type",
    "colname",
    "isvariant",
    "isunique",
];

/// Setting key holding the per-language column configuration of the table.
pub const COLUMNS_SETTING: &str = "translatedtabletext_cols";

/// Stored definition of one translated table text attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSettings {
    pub id: i64,
    #[serde(default)]
    pub col_name: String,
    #[serde(default = "default_value_table")]
    pub value_table: String,
    /// Remaining settings as supplied by the host, e.g. the column configuration.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_value_table() -> String {
    DEFAULT_VALUE_TABLE.to_string()
}

impl AttributeSettings {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            col_name: String::new(),
            value_table: default_value_table(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_value_table(mut self, table: impl Into<String>) -> Self {
        self.value_table = table.into();
        self
    }

    /// Names of all settings this attribute type reads.
    pub fn setting_names() -> Vec<&'static str> {
        let mut names = BASE_SETTING_NAMES.to_vec();
        names.push(COLUMNS_SETTING);
        names
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.extra.get(name)
    }
}

/// The collection an attribute belongs to, as far as language resolution goes.
pub trait ContentModel {
    /// Language values are currently read and written in.
    fn active_language(&self) -> &str;
    /// Language used when an item has no value in the active one.
    fn fallback_language(&self) -> &str;
}

/// Plain active/fallback pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub active: String,
    pub fallback: String,
}

impl LanguagePair {
    pub fn new(active: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            fallback: fallback.into(),
        }
    }
}

impl ContentModel for LanguagePair {
    fn active_language(&self) -> &str {
        &self.active
    }

    fn fallback_language(&self) -> &str {
        &self.fallback
    }
}
