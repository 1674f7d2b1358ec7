//! Broadcast port trait
//!
//! Defines the interface to the publish/subscribe bus count updates go out on.

use async_trait::async_trait;

use crate::domain::entities::{CountPayload, UserId};
use crate::error::BroadcastError;

/// Addressed publish to a named channel
///
/// Only the listed users receive the message. Delivery guarantees, retries
/// and timeouts belong to the implementation.
#[async_trait]
pub trait CountBroadcaster: Send + Sync {
    async fn publish(
        &self,
        channel: &str,
        payload: &CountPayload,
        user_ids: &[UserId],
    ) -> Result<(), BroadcastError>;
}
