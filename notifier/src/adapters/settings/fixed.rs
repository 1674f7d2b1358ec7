//! Fixed settings provider

use async_trait::async_trait;

use crate::domain::entities::NotifySettings;
use crate::domain::ports::SettingsProvider;
use crate::error::SettingsError;

/// Serves the same settings to every run
#[derive(Debug, Clone, Default)]
pub struct StaticSettingsProvider {
    settings: NotifySettings,
}

impl StaticSettingsProvider {
    pub fn new(settings: NotifySettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SettingsProvider for StaticSettingsProvider {
    async fn visibility_threshold(&self) -> Result<f64, SettingsError> {
        Ok(self.settings.min_priority)
    }

    async fn group_moderation_enabled(&self) -> Result<bool, SettingsError> {
        Ok(self.settings.group_moderation_enabled)
    }

    async fn unseen_tracking_enabled(&self) -> Result<bool, SettingsError> {
        Ok(self.settings.unseen_tracking_enabled)
    }

    async fn counts_channel(&self) -> Result<String, SettingsError> {
        Ok(self.settings.channel.clone())
    }

    async fn snapshot(&self) -> Result<NotifySettings, SettingsError> {
        Ok(self.settings.clone())
    }
}
