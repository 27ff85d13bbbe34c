//! Configuration loading for storefind.
//!
//! Reads `config.toml` from the data directory and applies environment
//! overrides. Falls back to defaults when the file is missing or
//! malformed, so a fresh checkout runs with zero setup against the local
//! provider.

use std::path::{Path, PathBuf};

use storefind_types::config::{AppConfig, ProviderKind};

/// Resolve the data directory holding the vector store and config file.
///
/// Priority: `STOREFIND_DATA_DIR` env var, then `~/.storefind`, then
/// `./.storefind` as a last resort.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STOREFIND_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".storefind");
    }

    PathBuf::from(".storefind")
}

/// Load configuration from `{data_dir}/config.toml` plus env overrides.
///
/// - Missing file: defaults.
/// - Unparseable file: warn and use defaults.
/// - `STOREFIND_PROVIDER` overrides the provider flag; `OPENAI_API_KEY`
///   overrides the credential.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    };

    if let Ok(provider) = std::env::var("STOREFIND_PROVIDER") {
        match provider.parse::<ProviderKind>() {
            Ok(kind) => config.provider = kind,
            Err(err) => tracing::warn!("Ignoring STOREFIND_PROVIDER: {err}"),
        }
    }

    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        if !key.is_empty() {
            config.openai_api_key = Some(key);
        }
    }

    config
}
