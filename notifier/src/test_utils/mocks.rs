//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing. They store
//! data in memory and allow tests to mutate it between runs and verify what
//! was published.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::adapters::CountMessage;
use crate::domain::entities::{
    CountPayload, GroupId, Reviewable, ReviewableId, Role, UserId, UserRecord,
};
use crate::domain::ports::{CountBroadcaster, ReviewableStore, SettingsProvider};
use crate::error::{BroadcastError, DomainError, SettingsError};

// ============================================================================
// In-Memory Reviewable Store
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryReviewableStore {
    reviewables: Arc<RwLock<BTreeMap<ReviewableId, Reviewable>>>,
    users: Arc<RwLock<BTreeMap<UserId, UserRecord>>>,
    /// Users listed as moderators in addition to their role
    moderator_flags: Arc<RwLock<HashSet<UserId>>>,
    watermarks: Arc<RwLock<HashMap<UserId, ReviewableId>>>,
    watermark_lookups: Arc<AtomicUsize>,
    fail_candidates: bool,
}

impl InMemoryReviewableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a reviewable for testing
    pub fn with_reviewable(self, reviewable: Reviewable) -> Self {
        self.add_reviewable(reviewable);
        self
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: UserRecord) -> Self {
        self.add_user(user);
        self
    }

    /// List an admin as a moderator too, the way staff flags overlap
    pub fn with_moderator_flag(self, user_id: UserId) -> Self {
        self.moderator_flags.write().unwrap().insert(user_id);
        self
    }

    pub fn with_watermark(self, user_id: UserId, seen: ReviewableId) -> Self {
        self.set_watermark(user_id, seen);
        self
    }

    /// Make `list_visible_candidates` fail with a database error
    pub fn failing_candidates(mut self) -> Self {
        self.fail_candidates = true;
        self
    }

    pub fn add_reviewable(&self, reviewable: Reviewable) {
        self.reviewables
            .write()
            .unwrap()
            .insert(reviewable.id, reviewable);
    }

    pub fn remove_reviewable(&self, id: ReviewableId) {
        self.reviewables.write().unwrap().remove(&id);
    }

    pub fn add_user(&self, user: UserRecord) {
        self.users.write().unwrap().insert(user.id, user);
    }

    pub fn set_watermark(&self, user_id: UserId, seen: ReviewableId) {
        self.watermarks.write().unwrap().insert(user_id, seen);
    }

    /// Number of batched watermark lookups served so far
    pub fn watermark_lookups(&self) -> usize {
        self.watermark_lookups.load(Ordering::SeqCst)
    }

    fn users_where(&self, predicate: impl Fn(&UserRecord) -> bool) -> Vec<UserRecord> {
        self.users
            .read()
            .unwrap()
            .values()
            .filter(|u| predicate(u))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReviewableStore for InMemoryReviewableStore {
    async fn get_reviewable(&self, id: &ReviewableId) -> Result<Option<Reviewable>, DomainError> {
        Ok(self.reviewables.read().unwrap().get(id).cloned())
    }

    async fn list_visible_candidates(
        &self,
        min_priority: f64,
    ) -> Result<Vec<Reviewable>, DomainError> {
        if self.fail_candidates {
            return Err(DomainError::Database("connection reset".to_string()));
        }
        Ok(self
            .reviewables
            .read()
            .unwrap()
            .values()
            .filter(|r| r.is_pending() && r.priority >= min_priority)
            .cloned()
            .collect())
    }

    async fn list_admins(&self) -> Result<Vec<UserRecord>, DomainError> {
        Ok(self.users_where(|u| u.role == Role::Admin))
    }

    async fn list_moderators(&self) -> Result<Vec<UserRecord>, DomainError> {
        let flags = self.moderator_flags.read().unwrap().clone();
        Ok(self.users_where(|u| u.role == Role::Moderator || flags.contains(&u.id)))
    }

    async fn list_group_members(
        &self,
        group_id: &GroupId,
    ) -> Result<Vec<UserRecord>, DomainError> {
        Ok(self.users_where(|u| u.is_member_of(*group_id)))
    }

    async fn get_recipient_watermark(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ReviewableId>, DomainError> {
        Ok(self.watermarks.read().unwrap().get(user_id).copied())
    }

    async fn get_recipient_watermarks(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, ReviewableId>, DomainError> {
        self.watermark_lookups.fetch_add(1, Ordering::SeqCst);
        let watermarks = self.watermarks.read().unwrap();
        Ok(user_ids
            .iter()
            .filter_map(|id| watermarks.get(id).map(|seen| (*id, *seen)))
            .collect())
    }
}

// ============================================================================
// Recording Broadcaster
// ============================================================================

#[derive(Default)]
pub struct RecordingBroadcaster {
    messages: RwLock<Vec<CountMessage>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message published so far, in order
    pub fn messages(&self) -> Vec<CountMessage> {
        self.messages.read().unwrap().clone()
    }

    /// Messages addressed to `user_id`
    pub fn messages_for(&self, user_id: UserId) -> Vec<CountMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.is_for(user_id))
            .collect()
    }

    /// Forget everything recorded, to observe the next run alone
    pub fn clear(&self) {
        self.messages.write().unwrap().clear();
    }
}

#[async_trait]
impl CountBroadcaster for RecordingBroadcaster {
    async fn publish(
        &self,
        channel: &str,
        payload: &CountPayload,
        user_ids: &[UserId],
    ) -> Result<(), BroadcastError> {
        self.messages.write().unwrap().push(CountMessage {
            channel: channel.to_string(),
            payload: *payload,
            user_ids: user_ids.to_vec(),
        });
        Ok(())
    }
}

// ============================================================================
// mockall mocks for failure injection
// ============================================================================

mockall::mock! {
    pub Broadcaster {}

    #[async_trait]
    impl CountBroadcaster for Broadcaster {
        async fn publish(
            &self,
            channel: &str,
            payload: &CountPayload,
            user_ids: &[UserId],
        ) -> Result<(), BroadcastError>;
    }
}

mockall::mock! {
    pub Settings {}

    #[async_trait]
    impl SettingsProvider for Settings {
        async fn visibility_threshold(&self) -> Result<f64, SettingsError>;
        async fn group_moderation_enabled(&self) -> Result<bool, SettingsError>;
        async fn unseen_tracking_enabled(&self) -> Result<bool, SettingsError>;
        async fn counts_channel(&self) -> Result<String, SettingsError>;
    }
}
