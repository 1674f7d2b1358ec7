//! Settings adapters
//!
//! Environment backed settings for deployments, and a fixed snapshot for
//! embedding and tests.

pub mod env;
pub mod fixed;

pub use env::EnvSettingsProvider;
pub use fixed::StaticSettingsProvider;
