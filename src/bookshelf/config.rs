use crate::error::{CatalogError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATABASE: &str = "library.sqlite3";
const DEFAULT_MIRROR: &str = "books.json";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "BOOKSHELF_HOME";

/// Configuration for bookshelf, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// SQLite database file, relative to the data directory unless absolute
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// JSON mirror file, relative to the data directory unless absolute
    #[serde(default = "default_mirror")]
    pub mirror: PathBuf,
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

fn default_mirror() -> PathBuf {
    PathBuf::from(DEFAULT_MIRROR)
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            mirror: default_mirror(),
        }
    }
}

impl CatalogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let config_path = data_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CatalogError::Io)?;
        let config: CatalogConfig =
            serde_json::from_str(&content).map_err(CatalogError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, data_dir: P) -> Result<()> {
        let data_dir = data_dir.as_ref();

        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(CatalogError::Io)?;
        }

        let config_path = data_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CatalogError::Serialization)?;
        fs::write(config_path, content).map_err(CatalogError::Io)?;
        Ok(())
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database)
    }

    pub fn mirror_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.mirror)
    }
}

/// Pick the data directory: explicit flag, then `BOOKSHELF_HOME`, then the platform default.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "bookshelf", "bookshelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CatalogError::Config("Could not determine data directory".to_string()))
}
