//! Infrastructure implementations for storefind.
//!
//! Concrete implementations of the `storefind-core` traits: LanceDB-backed
//! vector storage, fastembed local embedding, the OpenAI embeddings client,
//! plus the CSV catalog loader and configuration plumbing.

pub mod catalog;
pub mod config;
pub mod embedding;
pub mod store;
