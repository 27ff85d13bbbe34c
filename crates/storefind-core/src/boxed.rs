//! BoxEmbeddingProvider -- object-safe dynamic dispatch wrapper for
//! [`EmbeddingProvider`].
//!
//! The provider is selected at runtime from configuration, so the binary
//! needs a single type that can hold either implementation:
//! 1. Define an object-safe `EmbeddingProviderDyn` trait with boxed futures
//! 2. Blanket-impl it for all `T: EmbeddingProvider`
//! 3. `BoxEmbeddingProvider` wraps `Box<dyn EmbeddingProviderDyn>` and
//!    implements `EmbeddingProvider` by delegation, so the pipelines stay
//!    generic over the trait.

use std::future::Future;
use std::pin::Pin;

use storefind_types::error::EmbedError;

use super::provider::EmbeddingProvider;

/// Object-safe version of [`EmbeddingProvider`] with boxed futures.
///
/// Exists solely to enable dynamic dispatch; a blanket implementation
/// covers every `EmbeddingProvider`.
pub trait EmbeddingProviderDyn: Send + Sync {
    fn embed_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, EmbedError>> + Send + 'a>>;

    fn embed_batch_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, EmbedError>> + Send + 'a>>;

    fn model_name_dyn(&self) -> &str;

    fn dimension_dyn(&self) -> usize;
}

impl<T: EmbeddingProvider> EmbeddingProviderDyn for T {
    fn embed_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, EmbedError>> + Send + 'a>> {
        Box::pin(self.embed(text))
    }

    fn embed_batch_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, EmbedError>> + Send + 'a>> {
        Box::pin(self.embed_batch(texts))
    }

    fn model_name_dyn(&self) -> &str {
        self.model_name()
    }

    fn dimension_dyn(&self) -> usize {
        self.dimension()
    }
}

/// Type-erased embedding provider for runtime selection.
///
/// Since `EmbeddingProvider` uses RPITIT it cannot be a trait object
/// directly; this wrapper delegates through the object-safe
/// [`EmbeddingProviderDyn`].
pub struct BoxEmbeddingProvider {
    inner: Box<dyn EmbeddingProviderDyn + Send + Sync>,
}

impl BoxEmbeddingProvider {
    /// Wrap a concrete provider in a type-erased box.
    pub fn new<T: EmbeddingProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl EmbeddingProvider for BoxEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        self.inner.embed_boxed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        self.inner.embed_batch_boxed(texts).await
    }

    fn model_name(&self) -> &str {
        self.inner.model_name_dyn()
    }

    fn dimension(&self) -> usize {
        self.inner.dimension_dyn()
    }
}
