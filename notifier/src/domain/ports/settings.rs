//! Settings port trait
//!
//! Settings are owned by external configuration and may change between runs.

use async_trait::async_trait;

use crate::domain::entities::NotifySettings;
use crate::error::SettingsError;

/// Source of the runtime settings that drive visibility
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Minimum priority score a reviewable needs to be counted
    async fn visibility_threshold(&self) -> Result<f64, SettingsError>;

    /// Whether group members may moderate reviewables owned by their group
    async fn group_moderation_enabled(&self) -> Result<bool, SettingsError>;

    /// Whether unseen counts are computed and published
    async fn unseen_tracking_enabled(&self) -> Result<bool, SettingsError>;

    /// Channel count updates are published on
    async fn counts_channel(&self) -> Result<String, SettingsError>;

    /// Read every setting into one immutable snapshot. Fails if any read fails.
    async fn snapshot(&self) -> Result<NotifySettings, SettingsError> {
        Ok(NotifySettings {
            min_priority: self.visibility_threshold().await?,
            group_moderation_enabled: self.group_moderation_enabled().await?,
            unseen_tracking_enabled: self.unseen_tracking_enabled().await?,
            channel: self.counts_channel().await?,
        })
    }
}
