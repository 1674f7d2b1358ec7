//! Notify reviewable service
//!
//! Runs the full fan-out pipeline for one changed reviewable:
//! settings snapshot → audience → full recount → grouping → publish.
//! Nothing is carried over between runs.

use std::sync::Arc;

use tracing::Instrument;

use crate::app::audience::resolve_audience;
use crate::app::counts::count_all;
use crate::app::grouping::group_by_payload;
use crate::app::publisher::publish_groups;
use crate::domain::entities::{Recipient, ReviewableId, UserRecord};
use crate::domain::ports::{CountBroadcaster, ReviewableStore, SettingsProvider};
use crate::error::{DomainError, NotifyError};

/// Summary of one completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub recipients: usize,
    pub groups: usize,
    pub published: usize,
    pub failed: usize,
}

/// Service that recomputes and publishes reviewable counts
pub struct NotifyReviewableService<S, P, B>
where
    S: ReviewableStore,
    P: SettingsProvider,
    B: CountBroadcaster,
{
    store: Arc<S>,
    settings: Arc<P>,
    broadcaster: Arc<B>,
}

impl<S, P, B> NotifyReviewableService<S, P, B>
where
    S: ReviewableStore,
    P: SettingsProvider,
    B: CountBroadcaster,
{
    pub fn new(store: Arc<S>, settings: Arc<P>, broadcaster: Arc<B>) -> Self {
        Self {
            store,
            settings,
            broadcaster,
        }
    }

    /// Recompute and publish counts after `reviewable_id` was created or changed.
    ///
    /// Any settings or store failure aborts before the first publish. Publish
    /// failures are per group and only show up in the report.
    pub async fn on_reviewable_changed(
        &self,
        reviewable_id: ReviewableId,
    ) -> Result<NotifyReport, NotifyError> {
        let settings = self.settings.snapshot().await?;
        let threshold = settings.visibility_threshold();

        let reviewable = self
            .store
            .get_reviewable(&reviewable_id)
            .await?
            .ok_or(NotifyError::StaleEvent(reviewable_id))?;

        let audience = resolve_audience(self.store.as_ref(), &reviewable, &threshold).await?;
        if audience.is_empty() {
            tracing::debug!("No recipients, nothing to publish");
            return Ok(NotifyReport::default());
        }

        let queue = self
            .store
            .list_visible_candidates(threshold.min_priority)
            .await?;

        let recipients = self
            .load_recipients(audience.recipients(), settings.unseen_tracking_enabled)
            .await?;

        let results = count_all(
            &recipients,
            &queue,
            &threshold,
            settings.unseen_tracking_enabled,
        );
        let groups = group_by_payload(&results);
        let outcome = publish_groups(self.broadcaster.as_ref(), &settings.channel, &groups).await;

        let report = NotifyReport {
            recipients: recipients.len(),
            groups: groups.len(),
            published: outcome.published,
            failed: outcome.failed,
        };
        tracing::info!(
            queue_size = queue.len(),
            recipients = report.recipients,
            groups = report.groups,
            published = report.published,
            failed = report.failed,
            "Reviewable counts published"
        );
        Ok(report)
    }

    /// Run the pipeline and log the outcome instead of returning it.
    ///
    /// Entry point for the job worker: stale events are dropped, the next
    /// event corrects any counts this run could not publish.
    pub async fn handle_event(&self, reviewable_id: ReviewableId) {
        let span = tracing::info_span!("notify_reviewable", reviewable_id = %reviewable_id);
        async {
            match self.on_reviewable_changed(reviewable_id).await {
                Ok(_) => {}
                Err(e @ NotifyError::StaleEvent(_)) => {
                    tracing::warn!("Dropping event: {}", e);
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Run aborted, counts will catch up on the next event: {}", e);
                }
                Err(e) => {
                    tracing::error!("Run aborted: {}", e);
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn load_recipients(
        &self,
        users: Vec<UserRecord>,
        with_watermarks: bool,
    ) -> Result<Vec<Recipient>, DomainError> {
        let mut recipients: Vec<Recipient> = users.into_iter().map(Recipient::from).collect();
        if with_watermarks {
            let user_ids: Vec<_> = recipients.iter().map(|r| r.user_id).collect();
            let watermarks = self.store.get_recipient_watermarks(&user_ids).await?;
            for recipient in &mut recipients {
                recipient.last_seen_reviewable_id = watermarks.get(&recipient.user_id).copied();
            }
        }
        Ok(recipients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticSettingsProvider;
    use crate::domain::entities::{CountPayload, GroupId, NotifySettings, Role, UserId};
    use crate::error::SettingsError;
    use crate::test_utils::{
        test_reviewable, test_user_record, InMemoryReviewableStore, MockSettings,
        RecordingBroadcaster,
    };

    fn service(
        store: InMemoryReviewableStore,
        settings: NotifySettings,
    ) -> (
        NotifyReviewableService<InMemoryReviewableStore, StaticSettingsProvider, RecordingBroadcaster>,
        Arc<RecordingBroadcaster>,
    ) {
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        let service = NotifyReviewableService::new(
            Arc::new(store),
            Arc::new(StaticSettingsProvider::new(settings)),
            broadcaster.clone(),
        );
        (service, broadcaster)
    }

    #[tokio::test]
    async fn missing_reviewable_is_a_stale_event() {
        let store = InMemoryReviewableStore::new().with_user(test_user_record(1, Role::Admin, &[]));
        let (service, broadcaster) = service(store, NotifySettings::default());

        let err = service
            .on_reviewable_changed(ReviewableId(404))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::StaleEvent(ReviewableId(404))));
        assert!(broadcaster.messages().is_empty());
    }

    #[tokio::test]
    async fn no_audience_publishes_nothing() {
        let store = InMemoryReviewableStore::new()
            .with_reviewable(test_reviewable(1, 0.0, true, None))
            .with_user(test_user_record(5, Role::Regular, &[]));
        let (service, broadcaster) = service(store, NotifySettings::default());

        let report = service.on_reviewable_changed(ReviewableId(1)).await.unwrap();
        assert_eq!(report, NotifyReport::default());
        assert!(broadcaster.messages().is_empty());
    }

    #[tokio::test]
    async fn settings_failure_aborts_before_publishing() {
        let store = InMemoryReviewableStore::new()
            .with_reviewable(test_reviewable(1, 0.0, true, None))
            .with_user(test_user_record(1, Role::Admin, &[]));
        let mut settings = MockSettings::new();
        settings
            .expect_visibility_threshold()
            .returning(|| Err(SettingsError::Unavailable("settings table locked".into())));
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        let service =
            NotifyReviewableService::new(Arc::new(store), Arc::new(settings), broadcaster.clone());

        let err = service.on_reviewable_changed(ReviewableId(1)).await.unwrap_err();
        assert!(matches!(err, NotifyError::Settings(_)));
        assert!(!err.is_recoverable());
        assert!(broadcaster.messages().is_empty());
    }

    #[tokio::test]
    async fn store_failure_aborts_before_publishing() {
        let store = InMemoryReviewableStore::new()
            .with_reviewable(test_reviewable(1, 0.0, true, None))
            .with_user(test_user_record(1, Role::Admin, &[]))
            .failing_candidates();
        let (service, broadcaster) = service(store, NotifySettings::default());

        let err = service.on_reviewable_changed(ReviewableId(1)).await.unwrap_err();
        assert!(matches!(err, NotifyError::Store(_)));
        assert!(broadcaster.messages().is_empty());
    }

    #[tokio::test]
    async fn staff_in_a_group_get_one_merged_message() {
        let group = GroupId(10);
        let store = InMemoryReviewableStore::new()
            .with_reviewable(test_reviewable(1, 0.0, false, Some(group)))
            .with_reviewable(test_reviewable(2, 0.0, true, Some(group)))
            .with_user(test_user_record(1, Role::Admin, &[group]))
            .with_user(test_user_record(2, Role::Moderator, &[group]));
        let (service, broadcaster) =
            service(store, NotifySettings::default().with_group_moderation(true));

        let report = service.on_reviewable_changed(ReviewableId(2)).await.unwrap();
        assert_eq!(report.recipients, 2);

        let messages = broadcaster.messages();
        let for_admin: Vec<_> = messages
            .iter()
            .filter(|m| m.user_ids.contains(&UserId(1)))
            .collect();
        let for_moderator: Vec<_> = messages
            .iter()
            .filter(|m| m.user_ids.contains(&UserId(2)))
            .collect();
        assert_eq!(for_admin.len(), 1);
        assert_eq!(for_admin[0].payload, CountPayload::total(2));
        assert_eq!(for_moderator.len(), 1);
        assert_eq!(for_moderator[0].payload, CountPayload::total(1));
    }

    #[tokio::test]
    async fn watermarks_are_only_read_with_unseen_tracking() {
        let store = InMemoryReviewableStore::new()
            .with_reviewable(test_reviewable(1, 0.0, true, None))
            .with_reviewable(test_reviewable(2, 0.0, true, None))
            .with_user(test_user_record(1, Role::Admin, &[]))
            .with_watermark(UserId(1), ReviewableId(1));

        let (plain, broadcaster) = service(store.clone(), NotifySettings::default());
        plain.on_reviewable_changed(ReviewableId(2)).await.unwrap();
        assert_eq!(broadcaster.messages()[0].payload, CountPayload::total(2));

        let (tracked, broadcaster) =
            service(store, NotifySettings::default().with_unseen_tracking(true));
        tracked.on_reviewable_changed(ReviewableId(2)).await.unwrap();
        assert_eq!(
            broadcaster.messages()[0].payload,
            CountPayload::with_unseen(2, 1)
        );
    }

    #[tokio::test]
    async fn watermarks_are_loaded_in_one_batch() {
        let store = InMemoryReviewableStore::new()
            .with_reviewable(test_reviewable(1, 0.0, true, None))
            .with_reviewable(test_reviewable(2, 0.0, true, None))
            .with_user(test_user_record(1, Role::Admin, &[]))
            .with_user(test_user_record(2, Role::Admin, &[]))
            .with_user(test_user_record(3, Role::Moderator, &[]))
            .with_watermark(UserId(1), ReviewableId(1))
            .with_watermark(UserId(3), ReviewableId(2));

        let (service, broadcaster) = service(
            store.clone(),
            NotifySettings::default().with_unseen_tracking(true),
        );
        let report = service.on_reviewable_changed(ReviewableId(2)).await.unwrap();
        assert_eq!(report.recipients, 3);
        assert_eq!(store.watermark_lookups(), 1);

        assert_eq!(
            broadcaster.messages_for(UserId(1))[0].payload,
            CountPayload::with_unseen(2, 1)
        );
        assert_eq!(
            broadcaster.messages_for(UserId(2))[0].payload,
            CountPayload::with_unseen(2, 2)
        );
        assert_eq!(
            broadcaster.messages_for(UserId(3))[0].payload,
            CountPayload::with_unseen(2, 0)
        );
    }

    #[tokio::test]
    async fn handle_event_swallows_stale_events() {
        let (service, broadcaster) = service(InMemoryReviewableStore::new(), NotifySettings::default());
        service.handle_event(ReviewableId(9)).await;
        assert!(broadcaster.messages().is_empty());
    }
}
