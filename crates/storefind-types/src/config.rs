//! Runtime configuration types for storefind.
//!
//! `AppConfig` represents the top-level `config.toml` plus environment
//! overrides. The provider choice is made exactly once per process; the
//! dimension of every vector written to or queried against the store
//! follows from it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which embedding provider to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local ONNX model (BGE-small-en-v1.5, 384 dimensions). No network,
    /// no credential, deterministic for a given model version.
    Local,
    /// OpenAI embeddings API (text-embedding-3-small, 1536 dimensions).
    /// Requires an API key.
    OpenAi,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "openai" | "remote" => Ok(Self::OpenAi),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
///
/// All fields have defaults usable in a local development setup: the local
/// provider needs no credential and the catalog path points at
/// `data/products.csv` relative to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Embedding provider selection. Must match the provider used when the
    /// current table was ingested; the store rejects mismatched dimensions.
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,

    /// API key for the remote provider. Usually supplied via the
    /// OPENAI_API_KEY environment variable rather than the config file.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Base URL override for the remote provider (proxies, tests).
    #[serde(default)]
    pub openai_base_url: Option<String>,

    /// Path to the product catalog CSV.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
}

fn default_provider() -> ProviderKind {
    ProviderKind::Local
}

fn default_catalog_path() -> String {
    "data/products.csv".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            openai_api_key: None,
            openai_base_url: None,
            catalog_path: default_catalog_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.provider, ProviderKind::Local);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.catalog_path, "data/products.csv");
    }

    #[test]
    fn test_app_config_deserialize_with_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.provider, ProviderKind::Local);
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let config: AppConfig = toml::from_str(
            r#"
provider = "openai"
catalog_path = "catalog/items.csv"
"#,
        )
        .unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.catalog_path, "catalog/items.csv");
    }

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("local".parse::<ProviderKind>().unwrap(), ProviderKind::Local);
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!("oracle".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_kind_display_roundtrip() {
        for kind in [ProviderKind::Local, ProviderKind::OpenAi] {
            assert_eq!(kind.to_string().parse::<ProviderKind>().unwrap(), kind);
        }
    }
}
