//! LanceDB-backed vector storage for the product catalog.
//!
//! `LanceVectorStore` manages the connection and table lifecycle;
//! `LanceProductStore` implements the `ProductVectorStore` trait on top of
//! it. The Arrow schema for the `products` table lives in `schema`.

pub mod lance;
pub mod products;
pub mod schema;

pub use lance::LanceVectorStore;
pub use products::LanceProductStore;
