//! Embedding provider implementations.
//!
//! `local` runs a fastembed ONNX model in-process (384 dimensions, no
//! network, no credential); `openai` calls the OpenAI embeddings API
//! (1536 dimensions, requires an API key). Both implement the
//! `EmbeddingProvider` trait from `storefind-core`.

pub mod local;
pub mod openai;

pub use local::LocalEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;
