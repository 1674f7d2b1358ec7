//! Recipient domain entities
//!
//! Users who may receive reviewable count updates, and the groups they belong to.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::reviewable::ReviewableId;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Staff role of a user
///
/// Role and group membership are independent: an admin can belong to any
/// number of groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    Regular,
}

impl Role {
    /// Derive the role from the admin/moderator flags stored on a user.
    /// An admin flag wins over a moderator flag.
    pub fn from_flags(admin: bool, moderator: bool) -> Self {
        if admin {
            Role::Admin
        } else if moderator {
            Role::Moderator
        } else {
            Role::Regular
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Moderator => write!(f, "moderator"),
            Role::Regular => write!(f, "regular"),
        }
    }
}

/// A user as listed by the data store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub role: Role,
    pub group_ids: BTreeSet<GroupId>,
}

impl UserRecord {
    pub fn is_member_of(&self, group: GroupId) -> bool {
        self.group_ids.contains(&group)
    }
}

/// A user eligible to receive count updates in one fan-out run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub user_id: UserId,
    pub role: Role,
    pub group_ids: BTreeSet<GroupId>,
    /// Highest reviewable id the user has already observed.
    /// `None` means every visible reviewable counts as unseen.
    pub last_seen_reviewable_id: Option<ReviewableId>,
}

impl Recipient {
    pub fn is_member_of(&self, group: GroupId) -> bool {
        self.group_ids.contains(&group)
    }
}

impl From<UserRecord> for Recipient {
    fn from(user: UserRecord) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            group_ids: user.group_ids,
            last_seen_reviewable_id: None,
        }
    }
}
