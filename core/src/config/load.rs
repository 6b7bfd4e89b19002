use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default locbridge data directory: ~/.locbridge
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".locbridge"))
}

/// Path of the persisted bearer token.
pub fn get_token_file_path() -> anyhow::Result<PathBuf> {
    Ok(get_data_dir()?.join("token"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.locbridge/config.toml (highest)
    let data_dir = get_data_dir()?;
    let data_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if data_config.exists() {
        let s = std::fs::read_to_string(&data_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Default the store file into the data directory.
    if cfg
        .store
        .path
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .is_none()
    {
        cfg.store.path = Some(data_dir.join("store.json").to_string_lossy().to_string());
    }

    // Default the log directory into the data directory.
    if cfg
        .logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .is_none()
    {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    if let Ok(v) = std::env::var("LOCBRIDGE_BASE_URL") {
        if !v.trim().is_empty() {
            cfg.remote.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("LOCBRIDGE_STORE_PATH") {
        if !v.trim().is_empty() {
            cfg.store.path = Some(v);
        }
    }

    Ok(cfg)
}

/// Load configuration from an explicit file, still applying env overrides.
pub fn load_from_file(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
    let mut cfg: AppConfig = toml::from_str(&s)?;

    if let Ok(v) = std::env::var("LOCBRIDGE_BASE_URL") {
        if !v.trim().is_empty() {
            cfg.remote.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("LOCBRIDGE_STORE_PATH") {
        if !v.trim().is_empty() {
            cfg.store.path = Some(v);
        }
    }

    Ok(cfg)
}
