//! Audience resolver
//!
//! Enumerates the recipient classes that must hear about a changed reviewable:
//! admins, moderators and, with group moderation on, the members of the
//! reviewable's owning group.

use std::collections::HashSet;

use crate::domain::entities::{Reviewable, UserId, UserRecord, VisibilityThreshold};
use crate::domain::ports::ReviewableStore;
use crate::error::DomainError;

/// Recipient partitions for one run
///
/// Partitions only decide who is notified. A user listed in several of them
/// still gets a single count covering every scope they hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audience {
    pub admins: Vec<UserRecord>,
    /// Moderators that are not admins
    pub moderators: Vec<UserRecord>,
    /// Members of the owning group, including staff who are members
    pub group_members: Vec<UserRecord>,
}

impl Audience {
    pub fn is_empty(&self) -> bool {
        self.admins.is_empty() && self.moderators.is_empty() && self.group_members.is_empty()
    }

    /// Distinct users across all partitions, admins first, then moderators,
    /// then group members. Each user appears once.
    pub fn recipients(&self) -> Vec<UserRecord> {
        let mut seen = HashSet::new();
        self.admins
            .iter()
            .chain(&self.moderators)
            .chain(&self.group_members)
            .filter(|user| seen.insert(user.id))
            .cloned()
            .collect()
    }

    pub fn recipient_ids(&self) -> Vec<UserId> {
        self.recipients().into_iter().map(|u| u.id).collect()
    }
}

/// Resolve who must be notified about `reviewable`.
///
/// Moderator and group partitions are filled even when the reviewable is not
/// moderator visible: every recipient gets a full recount, so their totals
/// stay correct either way.
pub async fn resolve_audience<S>(
    store: &S,
    reviewable: &Reviewable,
    threshold: &VisibilityThreshold,
) -> Result<Audience, DomainError>
where
    S: ReviewableStore + ?Sized,
{
    let mut admins = store.list_admins().await?;
    sort_and_dedup(&mut admins);
    let admin_ids: HashSet<UserId> = admins.iter().map(|u| u.id).collect();

    let mut moderators = store.list_moderators().await?;
    moderators.retain(|u| !admin_ids.contains(&u.id));
    sort_and_dedup(&mut moderators);

    let group_members = match reviewable.owner_group {
        Some(group_id) if threshold.group_moderation => {
            let mut members = store.list_group_members(&group_id).await?;
            sort_and_dedup(&mut members);
            members
        }
        _ => Vec::new(),
    };

    tracing::debug!(
        reviewable_id = %reviewable.id,
        admins = admins.len(),
        moderators = moderators.len(),
        group_members = group_members.len(),
        "Resolved audience"
    );

    Ok(Audience {
        admins,
        moderators,
        group_members,
    })
}

fn sort_and_dedup(users: &mut Vec<UserRecord>) {
    users.sort_by_key(|u| u.id);
    users.dedup_by_key(|u| u.id);
}
