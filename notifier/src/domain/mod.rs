//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Reviewables, recipients and the settings snapshot
//! - `ports`: Trait definitions for the data store, settings and broadcast channel

pub mod entities;
pub mod ports;
