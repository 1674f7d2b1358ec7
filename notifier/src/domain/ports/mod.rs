//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod broadcast;
pub mod repositories;
pub mod settings;

pub use broadcast::CountBroadcaster;
pub use repositories::ReviewableStore;
pub use settings::SettingsProvider;
