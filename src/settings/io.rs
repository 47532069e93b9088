use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "MetaModels";
const APPLICATION: &str = "TranslatedTableText";
const CONFIG_FILE: &str = "settings.json";

/// Location of the settings file in the platform config directory.
pub fn default_config_path() -> io::Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
        Ok(proj_dirs.config_dir().join(CONFIG_FILE))
    } else {
        Err(io::Error::new(ErrorKind::NotFound, "Could not determine project directories for settings."))
    }
}

/// Load settings from `path`; a missing file yields the defaults.
pub fn load_settings_from<T: for<'de> serde::de::Deserialize<'de> + Default>(path: &Path) -> io::Result<T> {
    info!("Settings: Attempting to load settings from {:?}", path);
    match fs::File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            match serde_json::from_reader(reader) {
                Ok(settings) => {
                    debug!("Settings: Successfully deserialized settings.");
                    Ok(settings)
                }
                Err(e) => {
                    error!("Settings: Failed to parse settings file {:?}: {}", path, e);
                    Err(io::Error::new(ErrorKind::InvalidData, format!("Failed to parse settings file: {}", e)))
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Settings: Settings file not found at {:?}. Returning default.", path);
            Ok(Default::default())
        }
        Err(e) => {
            error!("Settings: Failed to open settings file {:?}: {}", path, e);
            Err(e)
        }
    }
}

/// Write settings to `path` as pretty JSON, creating parent directories.
pub fn save_settings_to<T: serde::Serialize>(path: &Path, settings: &T) -> io::Result<()> {
    info!("Settings: Saving settings to {:?}", path);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!("Settings: Failed to serialize settings to {:?}: {}", path, e);
        io::Error::new(ErrorKind::Other, e)
    })?;
    Ok(())
}
