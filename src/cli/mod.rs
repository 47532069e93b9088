// src/cli/mod.rs
// CLI tools for inspecting and maintaining the value table

pub mod import;
pub mod show;
pub mod types;
pub mod unset;
pub mod widget;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use translated_tabletext::attribute::{AttributeTypeRegistry, TRANSLATED_SIMPLE_TABLE};
use translated_tabletext::settings::{io as settings_io, StoreSettings};
use translated_tabletext::store::{DbConnection, StoreError, StoreResult};

#[derive(Parser)]
#[command(name = "tabletext")]
#[command(about = "Translated table text value store - maintenance tools", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, env = "TABLETEXT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file, overrides the settings file
    #[arg(long, global = true, env = "TABLETEXT_DB")]
    pub db: Option<PathBuf>,

    /// Value table name
    #[arg(long, global = true)]
    pub table: Option<String>,

    /// Attribute id the values belong to
    #[arg(long, global = true)]
    pub attribute: Option<i64>,

    /// Active language
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Fallback language
    #[arg(long, global = true)]
    pub fallback: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the value table if it does not exist
    Init,

    /// Print the grids of items as JSON
    Show {
        /// Item ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Only read the active language
        #[arg(long)]
        no_fallback: bool,
    },

    /// Write grids from a JSON file shaped {item: {row: {col: value}}}
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Print the editing form of one item
    Widget {
        /// Item id
        id: String,
    },

    /// Delete the values of items
    Unset {
        /// Item ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Only delete this language
        #[arg(long)]
        only_lang: Option<String>,
    },

    /// List registered attribute types
    Types,

    /// Print the effective settings, optionally saving them
    Settings {
        /// Write the effective settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

impl Cli {
    fn config_path(&self) -> StoreResult<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(settings_io::default_config_path()?),
        }
    }

    /// Settings from file with command-line overrides applied.
    pub fn effective_settings(&self) -> StoreResult<StoreSettings> {
        let mut settings: StoreSettings = settings_io::load_settings_from(&self.config_path()?)?;
        self.apply_overrides(&mut settings);
        if settings.table_name.trim().is_empty() {
            return Err(StoreError::InvalidSettings("table name must not be empty".to_string()));
        }
        Ok(settings)
    }

    fn apply_overrides(&self, settings: &mut StoreSettings) {
        if let Some(db) = &self.db {
            settings.database_path = db.clone();
        }
        if let Some(table) = &self.table {
            settings.table_name = table.clone();
        }
        if let Some(attribute) = self.attribute {
            settings.attribute_id = attribute;
        }
        if let Some(lang) = &self.lang {
            settings.active_language = lang.clone();
        }
        if let Some(fallback) = &self.fallback {
            settings.fallback_language = fallback.clone();
        }
    }
}

pub fn run(cli: Cli) -> StoreResult<()> {
    let settings = cli.effective_settings()?;

    match &cli.command {
        Commands::Types => return types::run(&AttributeTypeRegistry::default()),
        Commands::Settings { save } => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if *save {
                let path = cli.config_path()?;
                settings_io::save_settings_to(&path, &settings)?;
                println!("Saved to {}", path.display());
            }
            return Ok(());
        }
        _ => {}
    }

    let conn = DbConnection::open(&settings.database_path, &settings.table_name)?;
    let store = AttributeTypeRegistry::default().create_instance(
        TRANSLATED_SIMPLE_TABLE,
        &conn,
        settings.attribute(),
    )?;
    let languages = settings.languages();

    match cli.command {
        Commands::Init => {
            info!("Value table '{}' ready in {}", settings.table_name, settings.database_path.display());
            Ok(())
        }
        Commands::Show { ids, no_fallback } => show::run(&store, &languages, &ids, no_fallback),
        Commands::Import { file } => import::run(&store, &languages, &file),
        Commands::Widget { id } => widget::run(&store, &languages, &id),
        Commands::Unset { ids, only_lang } => unset::run(&store, &ids, only_lang.as_deref()),
        Commands::Types | Commands::Settings { .. } => Ok(()),
    }
}
