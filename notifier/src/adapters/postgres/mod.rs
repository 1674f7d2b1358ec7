//! PostgreSQL adapters
//!
//! Read-only implementation of the reviewable store using SeaORM and PostgreSQL.

pub mod store;


pub use store::PostgresReviewableStore;
