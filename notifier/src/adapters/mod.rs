//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod broadcast;
pub mod postgres;
pub mod settings;

pub use broadcast::{CountMessage, HttpBroadcaster, LocalBroadcaster};
pub use postgres::PostgresReviewableStore;
pub use settings::{EnvSettingsProvider, StaticSettingsProvider};
