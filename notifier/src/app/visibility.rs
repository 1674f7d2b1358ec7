//! Visibility evaluator
//!
//! Decides whether a single reviewable is visible to a recipient. Each way a
//! user can be entitled to see the queue is a [`RecipientScope`] with its own
//! predicate; a recipient sees a reviewable if any of their scopes admits it.

use std::collections::BTreeSet;

use crate::domain::entities::{GroupId, Recipient, Reviewable, Role, VisibilityThreshold};

/// One way a recipient is entitled to see reviewables
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecipientScope {
    /// Sees everything above the priority floor
    Admin,
    /// Sees moderator reviewables; group-owned ones only from their own groups
    /// while group moderation is on
    Moderator { groups: BTreeSet<GroupId> },
    /// Sees moderator reviewables owned by one of their groups
    GroupMember { groups: BTreeSet<GroupId> },
}

impl RecipientScope {
    /// Scope predicate, applied after the priority floor
    pub fn admits(&self, reviewable: &Reviewable, threshold: &VisibilityThreshold) -> bool {
        match self {
            RecipientScope::Admin => true,
            RecipientScope::Moderator { groups } => {
                if !reviewable.moderator_visible {
                    return false;
                }
                match reviewable.owner_group {
                    Some(owner) if threshold.group_moderation => groups.contains(&owner),
                    _ => true,
                }
            }
            RecipientScope::GroupMember { groups } => {
                threshold.group_moderation
                    && reviewable.moderator_visible
                    && reviewable
                        .owner_group
                        .is_some_and(|owner| groups.contains(&owner))
            }
        }
    }
}

/// Every scope that applies to a recipient, in a canonical order.
///
/// Recipients with equal scope lists see exactly the same reviewables.
pub fn scopes_for(recipient: &Recipient, threshold: &VisibilityThreshold) -> Vec<RecipientScope> {
    let mut scopes = Vec::with_capacity(2);
    match recipient.role {
        Role::Admin => scopes.push(RecipientScope::Admin),
        Role::Moderator => scopes.push(RecipientScope::Moderator {
            groups: recipient.group_ids.clone(),
        }),
        Role::Regular => {}
    }
    if threshold.group_moderation && !recipient.group_ids.is_empty() {
        scopes.push(RecipientScope::GroupMember {
            groups: recipient.group_ids.clone(),
        });
    }
    scopes
}

/// Whether a reviewable clears the threshold at all. Fails closed.
pub fn passes_floor(reviewable: &Reviewable, threshold: &VisibilityThreshold) -> bool {
    reviewable.is_pending() && reviewable.priority >= threshold.min_priority
}

/// Whether any of `scopes` can see `reviewable`
pub fn is_visible_in(
    reviewable: &Reviewable,
    scopes: &[RecipientScope],
    threshold: &VisibilityThreshold,
) -> bool {
    passes_floor(reviewable, threshold) && scopes.iter().any(|s| s.admits(reviewable, threshold))
}

/// Whether `reviewable` is visible to `recipient`
pub fn is_visible(
    reviewable: &Reviewable,
    recipient: &Recipient,
    threshold: &VisibilityThreshold,
) -> bool {
    is_visible_in(reviewable, &scopes_for(recipient, threshold), threshold)
}
