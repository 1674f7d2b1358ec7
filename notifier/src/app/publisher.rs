//! Fan-out publisher
//!
//! Emits one addressed message per group. A failed publish is logged and the
//! remaining groups still go out; nothing is retried or buffered.

use crate::domain::entities::MessageGroup;
use crate::domain::ports::CountBroadcaster;

/// What happened to the groups of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    pub published: usize,
    pub failed: usize,
}

pub async fn publish_groups<B>(
    broadcaster: &B,
    channel: &str,
    groups: &[MessageGroup],
) -> PublishOutcome
where
    B: CountBroadcaster + ?Sized,
{
    let mut outcome = PublishOutcome::default();

    for group in groups.iter().filter(|g| !g.user_ids.is_empty()) {
        match broadcaster
            .publish(channel, &group.payload, &group.user_ids)
            .await
        {
            Ok(()) => {
                tracing::debug!(
                    channel,
                    recipients = group.user_ids.len(),
                    reviewable_count = group.payload.reviewable_count,
                    unseen_reviewable_count = ?group.payload.unseen_reviewable_count,
                    "Published count update"
                );
                outcome.published += 1;
            }
            Err(e) => {
                tracing::warn!(
                    channel,
                    recipients = group.user_ids.len(),
                    "Failed to publish count update: {}",
                    e
                );
                outcome.failed += 1;
            }
        }
    }

    outcome
}
