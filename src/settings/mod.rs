pub mod io;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::attribute::{AttributeSettings, LanguagePair};
use crate::store::schema::DEFAULT_VALUE_TABLE;

/// Settings of the maintenance tool: which database, which attribute and
/// which languages to work with.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StoreSettings {
    pub database_path: PathBuf,
    pub table_name: String,
    pub attribute_id: i64,
    pub active_language: String,
    pub fallback_language: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("tabletext.db"),
            table_name: DEFAULT_VALUE_TABLE.to_string(),
            attribute_id: 1,
            active_language: "en".to_string(),
            fallback_language: "en".to_string(),
        }
    }
}

impl StoreSettings {
    pub fn attribute(&self) -> AttributeSettings {
        AttributeSettings::new(self.attribute_id).with_value_table(self.table_name.clone())
    }

    pub fn languages(&self) -> LanguagePair {
        LanguagePair::new(self.active_language.clone(), self.fallback_language.clone())
    }
}
