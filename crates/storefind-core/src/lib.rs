//! Core logic for storefind: the embedding and storage contracts, and the
//! two pipelines that compose them.
//!
//! Traits here use RPITIT (native async fn in traits, Rust 2024 edition);
//! concrete implementations live in `storefind-infra`. The pipelines are
//! generic over both traits so tests can substitute deterministic stubs.

pub mod boxed;
pub mod pipeline;
pub mod provider;
pub mod store;

pub use boxed::BoxEmbeddingProvider;
pub use pipeline::{run_ingestion, run_search, PipelineError, RankedProduct};
pub use provider::EmbeddingProvider;
pub use store::{ProductVectorStore, DEFAULT_TOP_K};
