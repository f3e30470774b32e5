//! Relational store for fork-back.
//!
//! [`Store`] wraps a SQLite pool with embedded migrations; the repository
//! modules under [`repo`] add one `impl Store` block per aggregate. Children
//! reference parents by foreign-key scalar only, so every query returning
//! related records is an explicit join — no object graph, no cycles.

pub mod repo;
pub mod seed;
pub mod store;

pub use store::Store;
