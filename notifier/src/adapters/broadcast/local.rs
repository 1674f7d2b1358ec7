//! In-process broadcaster
//!
//! [`LocalBroadcaster`] is a thin wrapper around [`tokio::sync::broadcast`].
//! Every subscriber receives every [`CountMessage`] and filters on
//! `user_ids` itself.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never waits on subscribers.
//! - **Bounded capacity**: slow receivers get `RecvError::Lagged(n)` and skip `n` messages.
//! - **No persistence**: messages sent while nobody is subscribed are dropped.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::entities::{CountPayload, UserId};
use crate::domain::ports::CountBroadcaster;
use crate::error::BroadcastError;

/// One addressed count update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountMessage {
    pub channel: String,
    pub payload: CountPayload,
    pub user_ids: Vec<UserId>,
}

impl CountMessage {
    pub fn is_for(&self, user_id: UserId) -> bool {
        self.user_ids.contains(&user_id)
    }
}

/// Broadcast channel for count updates inside one process
#[derive(Clone, Debug)]
pub struct LocalBroadcaster {
    tx: broadcast::Sender<CountMessage>,
}

impl LocalBroadcaster {
    /// Creates a broadcaster with the given channel capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// New receiver for messages published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<CountMessage> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl CountBroadcaster for LocalBroadcaster {
    async fn publish(
        &self,
        channel: &str,
        payload: &CountPayload,
        user_ids: &[UserId],
    ) -> Result<(), BroadcastError> {
        let message = CountMessage {
            channel: channel.to_string(),
            payload: *payload,
            user_ids: user_ids.to_vec(),
        };
        if self.tx.send(message).is_err() {
            tracing::trace!(channel, "No local subscribers, count update dropped");
        }
        Ok(())
    }
}
