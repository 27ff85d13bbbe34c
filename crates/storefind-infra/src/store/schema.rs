//! Arrow schema definition for the LanceDB `products` table.
//!
//! The embedding dimension is a runtime parameter because the two
//! providers disagree on it (384 for the local model, 1536 for OpenAI).
//! A table is created for exactly one dimension and rejects everything
//! else until the next schema reset.
//!
//! Arrow versions MUST match lancedb's transitive dependency (57.3 for
//! lancedb 0.26).

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// Fixed name of the single persisted table.
pub const PRODUCTS_TABLE: &str = "products";

/// Name of the vector column.
pub const EMBEDDING_COLUMN: &str = "embedding";

/// Schema for the products table: relational columns plus a
/// fixed-size float32 vector of the given dimension.
pub fn products_schema(dimension: i32) -> Schema {
    Schema::new(vec![
        Field::new("product_id", DataType::Int64, false),
        Field::new("product_name", DataType::Utf8, false),
        Field::new("description", DataType::Utf8, false),
        Field::new(
            EMBEDDING_COLUMN,
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                dimension,
            ),
            false,
        ),
    ])
}

/// Read the declared embedding dimension out of a table schema.
///
/// Returns None if the embedding column is missing or not a
/// fixed-size list, which means the table was not created by us.
pub fn embedding_dimension(schema: &Schema) -> Option<usize> {
    match schema.field_with_name(EMBEDDING_COLUMN).ok()?.data_type() {
        DataType::FixedSizeList(_, size) => Some(*size as usize),
        _ => None,
    }
}
