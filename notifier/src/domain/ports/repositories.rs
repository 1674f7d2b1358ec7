//! Repository port traits
//!
//! These traits define the read-only view of the moderation queue and its
//! reviewers. Implementations are provided by adapters (e.g., PostgreSQL).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::entities::{GroupId, Reviewable, ReviewableId, UserId, UserRecord};
use crate::error::DomainError;

/// Read access to reviewables, staff and group membership
#[async_trait]
pub trait ReviewableStore: Send + Sync {
    /// Find a reviewable by ID
    async fn get_reviewable(&self, id: &ReviewableId) -> Result<Option<Reviewable>, DomainError>;

    /// List every pending reviewable whose priority is at or above `min_priority`,
    /// ordered by id
    async fn list_visible_candidates(&self, min_priority: f64)
        -> Result<Vec<Reviewable>, DomainError>;

    /// List every admin
    async fn list_admins(&self) -> Result<Vec<UserRecord>, DomainError>;

    /// List every moderator. May include users who are also admins.
    async fn list_moderators(&self) -> Result<Vec<UserRecord>, DomainError>;

    /// List every member of a group
    async fn list_group_members(&self, group_id: &GroupId)
        -> Result<Vec<UserRecord>, DomainError>;

    /// Highest reviewable id the user has already observed
    async fn get_recipient_watermark(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ReviewableId>, DomainError>;

    /// Watermarks for several users in one lookup. Users without a watermark
    /// are absent from the map.
    async fn get_recipient_watermarks(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, ReviewableId>, DomainError> {
        let mut watermarks = HashMap::with_capacity(user_ids.len());
        for user_id in user_ids {
            if let Some(seen) = self.get_recipient_watermark(user_id).await? {
                watermarks.insert(*user_id, seen);
            }
        }
        Ok(watermarks)
    }
}
