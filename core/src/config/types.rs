use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the translation service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://b1-de.anywork.gmbh/vulcan".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Name of the managed collection.
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Key prefixes the engine is allowed to create/update/export.
    #[serde(default = "default_managed_prefixes")]
    pub managed_prefixes: Vec<String>,

    /// Cap on simultaneous in-flight export pushes.
    #[serde(default = "default_export_concurrency")]
    pub export_concurrency: usize,
}

fn default_collection_name() -> String {
    "Locales".to_string()
}

fn default_managed_prefixes() -> Vec<String> {
    vec!["Mod_".to_string(), "Com_".to_string()]
}

fn default_export_concurrency() -> usize {
    5
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            collection_name: default_collection_name(),
            managed_prefixes: default_managed_prefixes(),
            export_concurrency: default_export_concurrency(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the local store file. Empty or unset means
    /// `<data dir>/store.json`.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "locbridge_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.sync.collection_name, "Locales");
        assert_eq!(cfg.sync.managed_prefixes, vec!["Mod_", "Com_"]);
        assert_eq!(cfg.sync.export_concurrency, 5);
        assert!(cfg.logging.enabled);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [remote]
            base_url = "https://staging.example.com/vulcan"

            [sync]
            managed_prefixes = ["Mod_"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.remote.base_url, "https://staging.example.com/vulcan");
        assert_eq!(cfg.remote.timeout_ms, 30_000);
        assert_eq!(cfg.sync.managed_prefixes, vec!["Mod_"]);
        assert_eq!(cfg.sync.collection_name, "Locales");
    }
}
