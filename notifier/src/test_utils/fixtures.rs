//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::collections::BTreeSet;

use crate::domain::entities::{
    GroupId, Recipient, Reviewable, ReviewableId, ReviewableStatus, Role, UserId, UserRecord,
};

/// Create a pending reviewable
pub fn test_reviewable(
    id: i64,
    priority: f64,
    moderator_visible: bool,
    owner_group: Option<GroupId>,
) -> Reviewable {
    Reviewable {
        id: ReviewableId(id),
        priority,
        moderator_visible,
        owner_group,
        status: ReviewableStatus::Pending,
    }
}

/// Create a user record as the store would list it
pub fn test_user_record(id: i64, role: Role, groups: &[GroupId]) -> UserRecord {
    UserRecord {
        id: UserId(id),
        role,
        group_ids: groups.iter().copied().collect(),
    }
}

fn recipient(id: i64, role: Role, group_ids: BTreeSet<GroupId>) -> Recipient {
    Recipient {
        user_id: UserId(id),
        role,
        group_ids,
        last_seen_reviewable_id: None,
    }
}

/// Create an admin with no groups and no watermark
pub fn test_admin(id: i64) -> Recipient {
    recipient(id, Role::Admin, BTreeSet::new())
}

/// Create a moderator with no groups and no watermark
pub fn test_moderator(id: i64) -> Recipient {
    recipient(id, Role::Moderator, BTreeSet::new())
}

/// Create a regular user who belongs to `group`
pub fn test_group_member(id: i64, group: GroupId) -> Recipient {
    recipient(id, Role::Regular, [group].into_iter().collect())
}

/// Create a regular user with no groups
pub fn test_regular_user(id: i64) -> Recipient {
    recipient(id, Role::Regular, BTreeSet::new())
}
