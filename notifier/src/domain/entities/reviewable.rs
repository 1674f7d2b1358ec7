//! Reviewable domain entity
//!
//! Represents an item waiting in the moderation queue.

use serde::{Deserialize, Serialize};

use super::recipient::GroupId;

/// Unique identifier for a reviewable
///
/// Ids are assigned in creation order and never reused, so they double as
/// the cursor for a user's "last seen" watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReviewableId(pub i64);

impl From<i64> for ReviewableId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReviewableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reviewable status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewableStatus {
    Pending,
    Approved,
    Rejected,
    Ignored,
    Deleted,
}

impl ReviewableStatus {
    /// Integer code used by the `reviewables.status` column
    pub fn code(self) -> i32 {
        match self {
            ReviewableStatus::Pending => 0,
            ReviewableStatus::Approved => 1,
            ReviewableStatus::Rejected => 2,
            ReviewableStatus::Ignored => 3,
            ReviewableStatus::Deleted => 4,
        }
    }
}

impl TryFrom<i32> for ReviewableStatus {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ReviewableStatus::Pending),
            1 => Ok(ReviewableStatus::Approved),
            2 => Ok(ReviewableStatus::Rejected),
            3 => Ok(ReviewableStatus::Ignored),
            4 => Ok(ReviewableStatus::Deleted),
            _ => Err(format!("Unknown reviewable status: {}", code)),
        }
    }
}

impl std::fmt::Display for ReviewableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewableStatus::Pending => write!(f, "pending"),
            ReviewableStatus::Approved => write!(f, "approved"),
            ReviewableStatus::Rejected => write!(f, "rejected"),
            ReviewableStatus::Ignored => write!(f, "ignored"),
            ReviewableStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// An item awaiting moderation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewable {
    pub id: ReviewableId,
    /// Priority score, never negative
    pub priority: f64,
    /// Non-admin moderators may act on it
    pub moderator_visible: bool,
    /// Members of this group may act on it when group moderation is enabled
    pub owner_group: Option<GroupId>,
    pub status: ReviewableStatus,
}

impl Reviewable {
    pub fn is_pending(&self) -> bool {
        self.status == ReviewableStatus::Pending
    }
}
