//! Vector record store trait.
//!
//! Defines the storage contract for the single `products` table that holds
//! relational columns next to a fixed-dimension embedding. The LanceDB
//! implementation lives in `storefind-infra`.

use storefind_types::error::StoreError;
use storefind_types::product::{SearchResult, VectorRecord};

/// Default number of results returned by a nearest-neighbor query.
pub const DEFAULT_TOP_K: usize = 5;

/// Storage for product records with their description embeddings.
///
/// The store exclusively owns the table's lifecycle. There is no update
/// path and no migration: schema changes are destructive recreations via
/// [`reset_schema`].
///
/// [`reset_schema`]: ProductVectorStore::reset_schema
pub trait ProductVectorStore: Send + Sync {
    /// Drop the table if present (absence is a no-op, not an error) and
    /// create it fresh with an embedding column of `dimension` floats.
    ///
    /// Destructive and irreversible: all prior rows are lost.
    fn reset_schema(
        &self,
        dimension: usize,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Insert records as one logical transaction: all rows become visible
    /// together or none do. Zero records is a no-op returning Ok.
    ///
    /// Fails with [`StoreError::DimensionMismatch`] if any embedding's
    /// length differs from the table's declared dimension; nothing is
    /// written in that case.
    fn bulk_insert(
        &self,
        records: &[VectorRecord],
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Return the `k` rows with smallest cosine distance to `query`,
    /// ascending by distance. Equal distances are ordered by ascending
    /// `product_id` within the returned window; which of several rows tied
    /// exactly at the k-th position makes the cut is backend-defined. An
    /// empty table yields an empty Vec, not an error.
    fn nearest(
        &self,
        query: &[f32],
        k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, StoreError>> + Send;

    /// Count the stored rows.
    fn count(&self) -> impl std::future::Future<Output = Result<usize, StoreError>> + Send;
}
