//! Environment settings provider
//!
//! Reads settings from environment variables on every call, so a changed
//! value is picked up by the next run without a restart.
//!
//! | Variable                          | Meaning                                   |
//! |-----------------------------------|-------------------------------------------|
//! | `REVIEWABLE_DEFAULT_VISIBILITY`   | `low`, `medium` or `high` (required)      |
//! | `REVIEWABLE_PRIORITY_MEDIUM`      | min score for `medium` (required if used) |
//! | `REVIEWABLE_PRIORITY_HIGH`        | min score for `high` (required if used)   |
//! | `ENABLE_CATEGORY_GROUP_MODERATION`| bool, default false                       |
//! | `ENABLE_UNSEEN_REVIEWABLE_COUNT`  | bool, default false                       |
//! | `REVIEWABLE_COUNTS_CHANNEL`       | channel name, default `/reviewable_counts`|

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{PriorityThresholds, VisibilityLevel, DEFAULT_COUNTS_CHANNEL};
use crate::domain::ports::SettingsProvider;
use crate::error::SettingsError;

pub const VISIBILITY_VAR: &str = "REVIEWABLE_DEFAULT_VISIBILITY";
pub const PRIORITY_MEDIUM_VAR: &str = "REVIEWABLE_PRIORITY_MEDIUM";
pub const PRIORITY_HIGH_VAR: &str = "REVIEWABLE_PRIORITY_HIGH";
pub const GROUP_MODERATION_VAR: &str = "ENABLE_CATEGORY_GROUP_MODERATION";
pub const UNSEEN_TRACKING_VAR: &str = "ENABLE_UNSEEN_REVIEWABLE_COUNT";
pub const CHANNEL_VAR: &str = "REVIEWABLE_COUNTS_CHANNEL";

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Settings read from the process environment (or any key/value lookup)
#[derive(Clone)]
pub struct EnvSettingsProvider {
    lookup: Lookup,
}

impl EnvSettingsProvider {
    pub fn new() -> Self {
        Self {
            lookup: Arc::new(|key| std::env::var(key).ok()),
        }
    }

    /// Use a fixed map instead of the process environment
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            lookup: Arc::new(move |key| values.get(key).cloned()),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn require(&self, key: &str) -> Result<String, SettingsError> {
        self.get(key)
            .ok_or_else(|| SettingsError::Missing(key.to_string()))
    }

    fn flag(&self, key: &str) -> Result<bool, SettingsError> {
        match self.get(key) {
            None => Ok(false),
            Some(value) => parse_bool(&value).ok_or(SettingsError::Invalid {
                key: key.to_string(),
                value,
            }),
        }
    }

    fn score(&self, key: &str) -> Result<Option<f64>, SettingsError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        match value.trim().parse::<f64>() {
            Ok(score) if score.is_finite() && score >= 0.0 => Ok(Some(score)),
            _ => Err(SettingsError::Invalid {
                key: key.to_string(),
                value,
            }),
        }
    }

    fn level(&self) -> Result<VisibilityLevel, SettingsError> {
        let raw = self.require(VISIBILITY_VAR)?;
        raw.parse().map_err(|_| SettingsError::Invalid {
            key: VISIBILITY_VAR.to_string(),
            value: raw.clone(),
        })
    }

    /// Per-level score table. Scores that are set must be valid even when
    /// their level is not selected.
    pub fn thresholds(&self) -> Result<PriorityThresholds, SettingsError> {
        Ok(PriorityThresholds {
            medium: self.score(PRIORITY_MEDIUM_VAR)?,
            high: self.score(PRIORITY_HIGH_VAR)?,
        })
    }
}

fn score_var(level: VisibilityLevel) -> &'static str {
    match level {
        VisibilityLevel::Low => VISIBILITY_VAR,
        VisibilityLevel::Medium => PRIORITY_MEDIUM_VAR,
        VisibilityLevel::High => PRIORITY_HIGH_VAR,
    }
}

impl Default for EnvSettingsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnvSettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSettingsProvider").finish_non_exhaustive()
    }
}

#[async_trait]
impl SettingsProvider for EnvSettingsProvider {
    async fn visibility_threshold(&self) -> Result<f64, SettingsError> {
        let level = self.level()?;
        self.thresholds()?
            .min_score(level)
            .ok_or_else(|| SettingsError::Missing(score_var(level).to_string()))
    }

    async fn group_moderation_enabled(&self) -> Result<bool, SettingsError> {
        self.flag(GROUP_MODERATION_VAR)
    }

    async fn unseen_tracking_enabled(&self) -> Result<bool, SettingsError> {
        self.flag(UNSEEN_TRACKING_VAR)
    }

    async fn counts_channel(&self) -> Result<String, SettingsError> {
        Ok(self
            .get(CHANNEL_VAR)
            .unwrap_or_else(|| DEFAULT_COUNTS_CHANNEL.to_string()))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
