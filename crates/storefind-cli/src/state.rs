//! Application state wiring the provider and store together.
//!
//! AppState pins the generic pipelines to the concrete infra
//! implementations: the configured embedding provider behind a
//! `BoxEmbeddingProvider`, and the LanceDB-backed product store. One
//! AppState lives for exactly one CLI invocation; dropping it releases
//! the store connection whether the run succeeded or failed.

use std::path::Path;

use anyhow::Context;
use secrecy::SecretString;

use storefind_core::BoxEmbeddingProvider;
use storefind_infra::config::{load_config, resolve_data_dir};
use storefind_infra::embedding::{LocalEmbeddingProvider, OpenAiEmbeddingProvider};
use storefind_infra::store::{LanceProductStore, LanceVectorStore};
use storefind_types::config::{AppConfig, ProviderKind};
use storefind_types::error::ConfigError;

/// Shared application state for the CLI handlers.
pub struct AppState {
    pub config: AppConfig,
    pub provider: BoxEmbeddingProvider,
    pub store: LanceProductStore,
}

impl AppState {
    /// Initialize the application state: load config, select the provider,
    /// open the vector store.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let provider = build_provider(&config, &data_dir)?;

        let lance = LanceVectorStore::new(data_dir.join("vector_store"))
            .await
            .context("failed to open vector store")?;
        let store = LanceProductStore::new(lance);

        Ok(Self {
            config,
            provider,
            store,
        })
    }
}

/// Build the configured embedding provider.
///
/// The choice is made exactly once per process. Selecting the remote
/// provider without a credential fails here, before any pipeline work.
fn build_provider(config: &AppConfig, data_dir: &Path) -> Result<BoxEmbeddingProvider, ConfigError> {
    match config.provider {
        ProviderKind::Local => Ok(BoxEmbeddingProvider::new(LocalEmbeddingProvider::new(
            data_dir.join("models"),
        ))),
        ProviderKind::OpenAi => {
            let key = config
                .openai_api_key
                .clone()
                .ok_or(ConfigError::MissingApiKey)?;
            let mut provider = OpenAiEmbeddingProvider::new(SecretString::from(key));
            if let Some(base_url) = &config.openai_base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(BoxEmbeddingProvider::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use storefind_core::EmbeddingProvider;

    use super::*;

    #[test]
    fn test_build_provider_local_needs_no_key() {
        let config = AppConfig::default();
        let provider = build_provider(&config, Path::new("/tmp")).unwrap();
        assert_eq!(provider.dimension(), 384);
    }

    #[test]
    fn test_build_provider_openai_without_key_fails() {
        let config = AppConfig {
            provider: ProviderKind::OpenAi,
            ..AppConfig::default()
        };
        let result = build_provider(&config, Path::new("/tmp"));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_build_provider_openai_with_key() {
        let config = AppConfig {
            provider: ProviderKind::OpenAi,
            openai_api_key: Some("sk-test".to_string()),
            ..AppConfig::default()
        };
        let provider = build_provider(&config, Path::new("/tmp")).unwrap();
        assert_eq!(provider.dimension(), 1536);
    }
}
