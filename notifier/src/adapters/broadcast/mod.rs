//! Broadcast adapters
//!
//! Implementations of the count broadcast port: an HTTP publisher for an
//! external message bus, and an in-process channel.

pub mod http;
pub mod local;

pub use http::HttpBroadcaster;
pub use local::{CountMessage, LocalBroadcaster};
