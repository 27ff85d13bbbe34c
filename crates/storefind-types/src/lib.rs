//! Shared domain types for storefind.
//!
//! Plain data structures and the error taxonomy used across the workspace.
//! No I/O, no async -- every other crate depends on this one.

pub mod config;
pub mod error;
pub mod product;
