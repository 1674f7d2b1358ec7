//! Count results
//!
//! Transient values produced and consumed within a single fan-out run.

use serde::{Deserialize, Serialize};

use super::recipient::UserId;

/// Wire payload of a count update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountPayload {
    pub reviewable_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unseen_reviewable_count: Option<u64>,
}

impl CountPayload {
    pub fn total(count: u64) -> Self {
        Self {
            reviewable_count: count,
            unseen_reviewable_count: None,
        }
    }

    pub fn with_unseen(count: u64, unseen: u64) -> Self {
        Self {
            reviewable_count: count,
            unseen_reviewable_count: Some(unseen),
        }
    }
}

/// The count computed for one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountResult {
    pub user_id: UserId,
    pub payload: CountPayload,
}

/// Recipients sharing an identical payload, published as one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageGroup {
    pub payload: CountPayload,
    pub user_ids: Vec<UserId>,
}
