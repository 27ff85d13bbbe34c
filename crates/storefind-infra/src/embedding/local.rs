//! FastEmbed-based local embedding provider.
//!
//! Runs BGE-small-en-v1.5 (384 dimensions) through the ONNX runtime. The
//! model weights are downloaded on first use and cached; after that the
//! provider works fully offline and is deterministic for a given model
//! version.

use std::path::PathBuf;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tokio::sync::OnceCell;
use tracing::info;

use storefind_core::provider::EmbeddingProvider;
use storefind_types::error::EmbedError;

/// Output dimension of BGE-small-en-v1.5.
pub const LOCAL_EMBEDDING_DIMENSION: usize = 384;

/// Model identifier reported by [`EmbeddingProvider::model_name`].
pub const LOCAL_MODEL_NAME: &str = "BAAI/bge-small-en-v1.5";

/// The loaded model is process-wide state: initialized lazily on the first
/// embed call, never reloaded, torn down only at process exit. Inference
/// takes `&mut TextEmbedding`, so the cached model sits behind a Mutex.
static LOCAL_MODEL: OnceCell<Mutex<TextEmbedding>> = OnceCell::const_new();

/// Local embedding provider backed by fastembed.
pub struct LocalEmbeddingProvider {
    cache_dir: PathBuf,
}

impl LocalEmbeddingProvider {
    /// Create a provider that caches model weights under `cache_dir`.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    async fn model(&self) -> Result<&'static Mutex<TextEmbedding>, EmbedError> {
        LOCAL_MODEL
            .get_or_try_init(|| async {
                info!(model = LOCAL_MODEL_NAME, "loading local embedding model");
                let options = InitOptions::new(EmbeddingModel::BGESmallENV15)
                    .with_cache_dir(self.cache_dir.clone())
                    .with_show_download_progress(false);
                TextEmbedding::try_new(options)
                    .map(Mutex::new)
                    .map_err(|e| EmbedError::ModelLoad(e.to_string()))
            })
            .await
    }
}

impl EmbeddingProvider for LocalEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let model = self.model().await?;
        let mut vectors = model
            .lock()
            .expect("local embedding model mutex poisoned")
            .embed(vec![text], None)
            .map_err(|e| EmbedError::Provider {
                message: format!("local inference failed: {e}"),
            })?;
        vectors.pop().ok_or_else(|| EmbedError::Provider {
            message: "model returned no embedding".to_string(),
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = self.model().await?;
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        model.embed(refs, None).map_err(|e| EmbedError::Provider {
            message: format!("local inference failed: {e}"),
        })
    }

    fn model_name(&self) -> &str {
        LOCAL_MODEL_NAME
    }

    fn dimension(&self) -> usize {
        LOCAL_EMBEDDING_DIMENSION
    }
}
