//! The ingestion and search pipelines.
//!
//! Both are single sequential await chains: no retries, no partial
//! progress. A failed step aborts the run and surfaces to the caller.

use thiserror::Error;
use tracing::{debug, info};

use storefind_types::error::{CatalogError, EmbedError, StoreError};
use storefind_types::product::{ProductRecord, VectorRecord};

use crate::provider::EmbeddingProvider;
use crate::store::ProductVectorStore;

/// A pipeline run failure. Nothing in here is recovered locally.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("provider returned {actual} embeddings for {expected} records")]
    EmbeddingCountMismatch { expected: usize, actual: usize },
}

/// A search hit with its derived similarity score, ready for display.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RankedProduct {
    pub product_id: i64,
    pub product_name: String,
    pub description: String,
    pub distance: f32,
    pub similarity: f32,
}

/// Embed every description, reset the table, and insert all records.
///
/// Embedding happens in one batch call before the destructive
/// [`reset_schema`], so an embedding failure leaves the previous table
/// untouched. Running twice on the same input yields an identical table.
/// Returns the number of rows inserted.
///
/// [`reset_schema`]: ProductVectorStore::reset_schema
pub async fn run_ingestion<P, S>(
    provider: &P,
    store: &S,
    records: &[ProductRecord],
) -> Result<usize, PipelineError>
where
    P: EmbeddingProvider,
    S: ProductVectorStore,
{
    info!(
        records = records.len(),
        model = provider.model_name(),
        "starting ingestion"
    );

    let descriptions: Vec<String> = records.iter().map(|r| r.description.clone()).collect();
    let embeddings = provider.embed_batch(&descriptions).await?;

    if embeddings.len() != records.len() {
        return Err(PipelineError::EmbeddingCountMismatch {
            expected: records.len(),
            actual: embeddings.len(),
        });
    }
    debug!(count = embeddings.len(), "embeddings generated");

    store.reset_schema(provider.dimension()).await?;

    // Pair records with vectors by positional index.
    let rows: Vec<VectorRecord> = records
        .iter()
        .cloned()
        .zip(embeddings)
        .map(|(product, embedding)| VectorRecord::new(product, embedding))
        .collect();

    store.bulk_insert(&rows).await?;

    info!(rows = rows.len(), "ingestion complete");
    Ok(rows.len())
}

/// Embed one query string and return the top-k nearest products.
///
/// An empty result set is a valid outcome (empty table or no rows), not an
/// error. Search never mutates stored data.
pub async fn run_search<P, S>(
    provider: &P,
    store: &S,
    query: &str,
    k: usize,
) -> Result<Vec<RankedProduct>, PipelineError>
where
    P: EmbeddingProvider,
    S: ProductVectorStore,
{
    debug!(query, k, model = provider.model_name(), "running search");

    let query_vector = provider.embed(query).await?;
    let hits = store.nearest(&query_vector, k).await?;

    Ok(hits
        .into_iter()
        .map(|hit| RankedProduct {
            similarity: hit.similarity(),
            product_id: hit.product_id,
            product_name: hit.product_name,
            description: hit.description,
            distance: hit.distance,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use storefind_types::product::SearchResult;

    use super::*;

    /// Provider that maps each known text to a fixed unit vector.
    struct StubProvider {
        fail: bool,
    }

    impl StubProvider {
        fn ok() -> Self {
            Self { fail: false }
        }

        fn failing() -> Self {
            Self { fail: true }
        }

        fn vector_for(text: &str) -> Vec<f32> {
            // Deterministic 4-dim unit vector derived from the text length.
            let mut v = vec![0.0_f32; 4];
            v[text.len() % 4] = 1.0;
            v
        }
    }

    impl EmbeddingProvider for StubProvider {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
            if self.fail {
                return Err(EmbedError::Provider {
                    message: "stub failure".to_string(),
                });
            }
            Ok(Self::vector_for(text))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            if self.fail {
                return Err(EmbedError::Provider {
                    message: "stub failure".to_string(),
                });
            }
            Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
        }

        fn model_name(&self) -> &str {
            "stub"
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    /// In-memory store with real cosine-distance ranking.
    #[derive(Default)]
    struct MemoryStore {
        table: Mutex<Option<(usize, Vec<VectorRecord>)>>,
        resets: Mutex<usize>,
    }

    impl MemoryStore {
        fn row_count(&self) -> usize {
            self.table
                .lock()
                .unwrap()
                .as_ref()
                .map_or(0, |(_, rows)| rows.len())
        }

        fn reset_count(&self) -> usize {
            *self.resets.lock().unwrap()
        }

        fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
            let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
            let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            1.0 - dot / (na * nb)
        }
    }

    impl ProductVectorStore for MemoryStore {
        async fn reset_schema(&self, dimension: usize) -> Result<(), StoreError> {
            *self.table.lock().unwrap() = Some((dimension, Vec::new()));
            *self.resets.lock().unwrap() += 1;
            Ok(())
        }

        async fn bulk_insert(&self, records: &[VectorRecord]) -> Result<(), StoreError> {
            if records.is_empty() {
                return Ok(());
            }
            let mut guard = self.table.lock().unwrap();
            let (dimension, rows) = guard
                .as_mut()
                .ok_or_else(|| StoreError::TableMissing("products".to_string()))?;
            for record in records {
                if record.embedding.len() != *dimension {
                    return Err(StoreError::DimensionMismatch {
                        expected: *dimension,
                        actual: record.embedding.len(),
                    });
                }
            }
            rows.extend_from_slice(records);
            Ok(())
        }

        async fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>, StoreError> {
            let guard = self.table.lock().unwrap();
            let (dimension, rows) = guard
                .as_ref()
                .ok_or_else(|| StoreError::TableMissing("products".to_string()))?;
            if query.len() != *dimension {
                return Err(StoreError::DimensionMismatch {
                    expected: *dimension,
                    actual: query.len(),
                });
            }
            let mut results: Vec<SearchResult> = rows
                .iter()
                .map(|row| SearchResult {
                    product_id: row.product.product_id,
                    product_name: row.product.product_name.clone(),
                    description: row.product.description.clone(),
                    distance: Self::cosine_distance(query, &row.embedding),
                })
                .collect();
            results.sort_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.product_id.cmp(&b.product_id))
            });
            results.truncate(k);
            Ok(results)
        }

        async fn count(&self) -> Result<usize, StoreError> {
            Ok(self.row_count())
        }
    }

    fn sample_records() -> Vec<ProductRecord> {
        vec![
            ProductRecord {
                product_id: 1,
                product_name: "Red shoes".to_string(),
                description: "Comfortable red running shoes".to_string(),
            },
            ProductRecord {
                product_id: 2,
                product_name: "Blue hat".to_string(),
                description: "Warm blue winter hat".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_ingestion_inserts_all_records() {
        let provider = StubProvider::ok();
        let store = MemoryStore::default();

        let inserted = run_ingestion(&provider, &store, &sample_records())
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(store.row_count(), 2);
    }

    #[tokio::test]
    async fn test_ingestion_is_idempotent() {
        let provider = StubProvider::ok();
        let store = MemoryStore::default();
        let records = sample_records();

        run_ingestion(&provider, &store, &records).await.unwrap();
        run_ingestion(&provider, &store, &records).await.unwrap();

        // Second run starts from a clean slate, so row count is unchanged.
        assert_eq!(store.row_count(), 2);
        assert_eq!(store.reset_count(), 2);
    }

    #[tokio::test]
    async fn test_ingestion_failure_leaves_store_untouched() {
        let provider = StubProvider::failing();
        let store = MemoryStore::default();

        let result = run_ingestion(&provider, &store, &sample_records()).await;

        assert!(matches!(result, Err(PipelineError::Embed(_))));
        // Embedding failed before reset_schema: no table was created.
        assert_eq!(store.reset_count(), 0);
        assert_eq!(store.row_count(), 0);
    }

    /// Provider that violates the one-vector-per-text contract.
    struct ShortProvider;

    impl EmbeddingProvider for ShortProvider {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
            Ok(vec![1.0, 0.0, 0.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Ok(texts
                .iter()
                .skip(1)
                .map(|_| vec![1.0, 0.0, 0.0, 0.0])
                .collect())
        }

        fn model_name(&self) -> &str {
            "short"
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    #[tokio::test]
    async fn test_ingestion_rejects_embedding_count_mismatch() {
        let store = MemoryStore::default();

        let result = run_ingestion(&ShortProvider, &store, &sample_records()).await;

        assert!(matches!(
            result,
            Err(PipelineError::EmbeddingCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
        // The mismatch is caught before the destructive reset.
        assert_eq!(store.reset_count(), 0);
    }

    #[tokio::test]
    async fn test_ingestion_empty_input_yields_empty_table() {
        let provider = StubProvider::ok();
        let store = MemoryStore::default();

        let inserted = run_ingestion(&provider, &store, &[]).await.unwrap();

        assert_eq!(inserted, 0);
        assert_eq!(store.reset_count(), 1);
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn test_search_returns_exact_match_first() {
        let provider = StubProvider::ok();
        let store = MemoryStore::default();
        let records = sample_records();
        run_ingestion(&provider, &store, &records).await.unwrap();

        // Querying with a stored description must rank its product first
        // with distance ~0.
        let results = run_search(&provider, &store, "Warm blue winter hat", 5)
            .await
            .unwrap();

        assert_eq!(results[0].product_id, 2);
        assert!(results[0].distance.abs() < 1e-6);
        assert!((results[0].similarity - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_search_respects_k() {
        let provider = StubProvider::ok();
        let store = MemoryStore::default();
        run_ingestion(&provider, &store, &sample_records())
            .await
            .unwrap();

        let results = run_search(&provider, &store, "anything here", 1)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_search_empty_table_is_ok() {
        let provider = StubProvider::ok();
        let store = MemoryStore::default();
        store.reset_schema(provider.dimension()).await.unwrap();

        let results = run_search(&provider, &store, "no products yet", 5)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_missing_table_is_error() {
        let provider = StubProvider::ok();
        let store = MemoryStore::default();

        let result = run_search(&provider, &store, "query", 5).await;
        assert!(matches!(
            result,
            Err(PipelineError::Store(StoreError::TableMissing(_)))
        ));
    }

    #[tokio::test]
    async fn test_results_ordered_by_distance() {
        let provider = StubProvider::ok();
        let store = MemoryStore::default();
        let mut records = sample_records();
        records.push(ProductRecord {
            product_id: 3,
            product_name: "Green scarf".to_string(),
            description: "Soft green wool scarf".to_string(),
        });
        run_ingestion(&provider, &store, &records).await.unwrap();

        let results = run_search(&provider, &store, "Comfortable red running shoes", 5)
            .await
            .unwrap();

        for window in results.windows(2) {
            assert!(window[0].distance <= window[1].distance);
        }
    }
}
