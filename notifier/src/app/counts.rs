//! Count aggregator
//!
//! Counts, for each recipient, how many reviewables in the whole current queue
//! they may see, and optionally how many of those are newer than their
//! watermark. The triggering reviewable is never used as a delta.

use std::collections::HashMap;

use crate::app::visibility::{is_visible_in, scopes_for, RecipientScope};
use crate::domain::entities::{
    CountPayload, CountResult, Recipient, Reviewable, ReviewableId, VisibilityThreshold,
};

/// Full recount for one recipient
pub fn count_for(
    recipient: &Recipient,
    queue: &[Reviewable],
    threshold: &VisibilityThreshold,
    unseen_tracking: bool,
) -> CountPayload {
    let scopes = scopes_for(recipient, threshold);
    let visible = visible_ids(&scopes, queue, threshold);
    payload_for(&visible, recipient.last_seen_reviewable_id, unseen_tracking)
}

/// Counts for every recipient, one result per recipient, in input order.
///
/// Recipients with identical scopes share the visible set; only the unseen
/// part depends on the individual watermark.
pub fn count_all(
    recipients: &[Recipient],
    queue: &[Reviewable],
    threshold: &VisibilityThreshold,
    unseen_tracking: bool,
) -> Vec<CountResult> {
    let mut visible_by_scope: HashMap<Vec<RecipientScope>, Vec<ReviewableId>> = HashMap::new();

    recipients
        .iter()
        .map(|recipient| {
            let scopes = scopes_for(recipient, threshold);
            let visible = visible_by_scope
                .entry(scopes)
                .or_insert_with_key(|scopes| visible_ids(scopes, queue, threshold));
            CountResult {
                user_id: recipient.user_id,
                payload: payload_for(visible, recipient.last_seen_reviewable_id, unseen_tracking),
            }
        })
        .collect()
}

fn visible_ids(
    scopes: &[RecipientScope],
    queue: &[Reviewable],
    threshold: &VisibilityThreshold,
) -> Vec<ReviewableId> {
    if scopes.is_empty() {
        return Vec::new();
    }
    queue
        .iter()
        .filter(|r| is_visible_in(r, scopes, threshold))
        .map(|r| r.id)
        .collect()
}

fn payload_for(
    visible: &[ReviewableId],
    watermark: Option<ReviewableId>,
    unseen_tracking: bool,
) -> CountPayload {
    let count = visible.len() as u64;
    if !unseen_tracking {
        return CountPayload::total(count);
    }
    let unseen = match watermark {
        Some(seen) => visible.iter().filter(|id| **id > seen).count() as u64,
        None => count,
    };
    // A watermark past the newest id yields zero, never less
    CountPayload::with_unseen(count, unseen.min(count))
}
