//! Embedding provider trait for text-to-vector conversion.
//!
//! Defines the interface for turning free text into fixed-length float
//! vectors. Implementations (local ONNX model, OpenAI API) live in
//! `storefind-infra`.

use storefind_types::error::EmbedError;

/// Converts text into fixed-length embedding vectors.
///
/// A provider is a pure function from text to vector, parameterized by a
/// configuration chosen once at process start. It owns no persistent
/// state beyond a lazily loaded model.
///
/// Every vector a provider returns has exactly [`dimension`] elements;
/// the store enforces that this matches the table it was created with.
///
/// [`dimension`]: EmbeddingProvider::dimension
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, EmbedError>> + Send;

    /// Embed many texts in one call.
    ///
    /// Returns one vector per input text, in input order -- no reordering,
    /// no deduplication. An empty input yields an empty output. Ingestion
    /// calls this once over the whole catalog to amortize provider
    /// overhead.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, EmbedError>> + Send;

    /// The model identifier (e.g., "BAAI/bge-small-en-v1.5").
    fn model_name(&self) -> &str;

    /// The fixed length of every vector this provider produces.
    fn dimension(&self) -> usize;
}
