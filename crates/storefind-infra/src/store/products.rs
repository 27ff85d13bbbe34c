//! LanceDB implementation of the `ProductVectorStore` trait.
//!
//! Persists product rows next to their description embeddings in the
//! single `products` table and answers cosine-distance top-k queries.

use std::sync::Arc;

use arrow_array::{
    Array, FixedSizeListArray, Float32Array, Int64Array, RecordBatch, RecordBatchIterator,
    StringArray,
};
use arrow_schema::{DataType, Field};
use futures_util::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use tracing::debug;

use storefind_core::store::ProductVectorStore;
use storefind_types::error::StoreError;
use storefind_types::product::{SearchResult, VectorRecord};

use super::lance::LanceVectorStore;
use super::schema::{embedding_dimension, products_schema, PRODUCTS_TABLE};

/// Product vector store backed by an embedded LanceDB database.
///
/// The table's declared dimension is fixed at [`reset_schema`] time and
/// every insert and query is checked against it before touching data, so
/// a provider switch without a matching reset fails fast instead of
/// silently truncating or padding vectors.
///
/// [`reset_schema`]: ProductVectorStore::reset_schema
pub struct LanceProductStore {
    store: LanceVectorStore,
}

impl LanceProductStore {
    pub fn new(store: LanceVectorStore) -> Self {
        Self { store }
    }

    /// Open the products table, mapping absence to [`StoreError::TableMissing`].
    async fn open_products(&self) -> Result<lancedb::Table, StoreError> {
        match self.store.open_table(PRODUCTS_TABLE).await {
            Ok(table) => Ok(table),
            Err(lancedb::Error::TableNotFound { .. }) => {
                Err(StoreError::TableMissing(PRODUCTS_TABLE.to_string()))
            }
            Err(e) => Err(StoreError::Connection(format!(
                "failed to open products table: {e}"
            ))),
        }
    }

    /// Read the dimension the table was created with.
    async fn declared_dimension(table: &lancedb::Table) -> Result<usize, StoreError> {
        let schema = table
            .schema()
            .await
            .map_err(|e| StoreError::Query(format!("failed to read table schema: {e}")))?;
        embedding_dimension(&schema).ok_or_else(|| {
            StoreError::Query("products table has no fixed-size embedding column".to_string())
        })
    }

    /// Pack all records into a single RecordBatch.
    ///
    /// One batch means one `Table::add` call, which is one Lance commit:
    /// readers see all rows or none.
    fn build_record_batch(
        records: &[VectorRecord],
        dimension: usize,
    ) -> Result<RecordBatch, StoreError> {
        let schema = Arc::new(products_schema(dimension as i32));

        let id_array = Int64Array::from(
            records
                .iter()
                .map(|r| r.product.product_id)
                .collect::<Vec<_>>(),
        );
        let name_array = StringArray::from(
            records
                .iter()
                .map(|r| r.product.product_name.clone())
                .collect::<Vec<_>>(),
        );
        let description_array = StringArray::from(
            records
                .iter()
                .map(|r| r.product.description.clone())
                .collect::<Vec<_>>(),
        );

        // Build the FixedSizeList vector column from the flattened values.
        let flat: Vec<f32> = records
            .iter()
            .flat_map(|r| r.embedding.iter().copied())
            .collect();
        let values = Float32Array::from(flat);
        let field = Arc::new(Field::new("item", DataType::Float32, true));
        let vector_array =
            FixedSizeListArray::new(field, dimension as i32, Arc::new(values), None);

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(id_array),
                Arc::new(name_array),
                Arc::new(description_array),
                Arc::new(vector_array),
            ],
        )
        .map_err(|e| StoreError::Query(format!("failed to build record batch: {e}")))
    }

    /// Parse query-result batches into SearchResults using the `_distance`
    /// column LanceDB appends.
    fn batch_to_results(batch: &RecordBatch) -> Result<Vec<SearchResult>, StoreError> {
        let num_rows = batch.num_rows();
        if num_rows == 0 {
            return Ok(vec![]);
        }

        let id_col = downcast_column::<Int64Array>(batch, "product_id")?;
        let name_col = downcast_column::<StringArray>(batch, "product_name")?;
        let description_col = downcast_column::<StringArray>(batch, "description")?;
        let distance_col = downcast_column::<Float32Array>(batch, "_distance")?;

        let mut results = Vec::with_capacity(num_rows);
        for i in 0..num_rows {
            results.push(SearchResult {
                product_id: id_col.value(i),
                product_name: name_col.value(i).to_string(),
                description: description_col.value(i).to_string(),
                distance: distance_col.value(i),
            });
        }
        Ok(results)
    }
}

fn downcast_column<'a, T: 'static>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a T, StoreError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| StoreError::Query(format!("missing or mistyped column '{name}'")))
}

impl ProductVectorStore for LanceProductStore {
    async fn reset_schema(&self, dimension: usize) -> Result<(), StoreError> {
        self.store
            .drop_table(PRODUCTS_TABLE)
            .await
            .map_err(|e| StoreError::Query(format!("failed to drop products table: {e}")))?;

        let schema = Arc::new(products_schema(dimension as i32));
        self.store
            .create_table(PRODUCTS_TABLE, schema)
            .await
            .map_err(|e| StoreError::Query(format!("failed to create products table: {e}")))?;

        debug!(dimension, "products table recreated");
        Ok(())
    }

    async fn bulk_insert(&self, records: &[VectorRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let table = self.open_products().await?;
        let dimension = Self::declared_dimension(&table).await?;

        // Validate every row before writing anything.
        for record in records {
            if record.embedding.len() != dimension {
                return Err(StoreError::DimensionMismatch {
                    expected: dimension,
                    actual: record.embedding.len(),
                });
            }
        }

        let batch = Self::build_record_batch(records, dimension)?;
        let schema = batch.schema();
        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);

        table
            .add(reader)
            .execute()
            .await
            .map_err(|e| StoreError::Query(format!("failed to insert products: {e}")))?;

        debug!(rows = records.len(), "products inserted");
        Ok(())
    }

    async fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>, StoreError> {
        let table = self.open_products().await?;
        let dimension = Self::declared_dimension(&table).await?;

        if query.len() != dimension {
            return Err(StoreError::DimensionMismatch {
                expected: dimension,
                actual: query.len(),
            });
        }

        let stream = table
            .vector_search(query)
            .map_err(|e| StoreError::Query(format!("vector search setup failed: {e}")))?
            .distance_type(lancedb::DistanceType::Cosine)
            .limit(k)
            .execute()
            .await
            .map_err(|e| StoreError::Query(format!("vector search failed: {e}")))?;

        let batches: Vec<RecordBatch> = stream
            .try_collect()
            .await
            .map_err(|e| StoreError::Query(format!("failed to collect search results: {e}")))?;

        let mut results = Vec::new();
        for batch in &batches {
            results.extend(Self::batch_to_results(batch)?);
        }

        // Lance orders by distance already; re-sort with product_id as the
        // deterministic tie-break for equal distances. The tie-break only
        // applies within the k rows Lance returned: ties straddling the
        // k-th position were already cut by limit(k). Over-fetch with
        // slack before truncating if boundary determinism ever matters.
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
        let table = self.open_products().await?;
        table
            .count_rows(None)
            .await
            .map_err(|e| StoreError::Query(format!("failed to count products: {e}")))
    }
}
