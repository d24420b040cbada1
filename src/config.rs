use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelebillConfig {
    pub database: Option<String>,
    /// Create missing tables before the menu is shown
    #[serde(default)]
    pub init_on_start: bool,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("telebill.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("billing.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TelebillConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TelebillConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Pick the database path: explicit flag, then config file, then `billing.db`.
pub fn resolve_database_path(flag: Option<&Path>, config: Option<&TelebillConfig>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(default_database_path)
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
