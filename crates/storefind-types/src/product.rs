//! Product catalog records and search results.

use serde::{Deserialize, Serialize};

/// One row of the source catalog file.
///
/// The serde field names double as the required CSV headers:
/// `product_id,product_name,description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: i64,
    pub product_name: String,
    pub description: String,
}

/// A product paired with the embedding of its description.
///
/// Created during ingestion and persisted as one row in the `products`
/// table. Rows are immutable; the only way to remove them is a schema
/// reset that recreates the table.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    pub product: ProductRecord,
    pub embedding: Vec<f32>,
}

impl VectorRecord {
    pub fn new(product: ProductRecord, embedding: Vec<f32>) -> Self {
        Self { product, embedding }
    }
}

/// A single hit from a nearest-neighbor query. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub product_id: i64,
    pub product_name: String,
    pub description: String,
    /// Cosine distance to the query vector, in `[0.0, 2.0]`.
    pub distance: f32,
}

impl SearchResult {
    /// Similarity score derived as `1.0 - distance`.
    ///
    /// Because cosine distance ranges over `[0.0, 2.0]`, the result lies in
    /// `[-1.0, 1.0]` -- callers must not assume it is non-negative.
    pub fn similarity(&self) -> f32 {
        1.0 - self.distance
    }
}
