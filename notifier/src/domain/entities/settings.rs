//! Settings snapshot
//!
//! Runtime settings are read once at the start of a fan-out run and frozen
//! into a `NotifySettings` value, so a run never observes a setting change
//! halfway through.

use serde::{Deserialize, Serialize};

/// Channel count updates are published on unless configured otherwise
pub const DEFAULT_COUNTS_CHANNEL: &str = "/reviewable_counts";

/// Named visibility level for the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for VisibilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisibilityLevel::Low => write!(f, "low"),
            VisibilityLevel::Medium => write!(f, "medium"),
            VisibilityLevel::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for VisibilityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(VisibilityLevel::Low),
            "medium" => Ok(VisibilityLevel::Medium),
            "high" => Ok(VisibilityLevel::High),
            _ => Err(format!("Unknown visibility level: {}", s)),
        }
    }
}

/// Minimum priority score for each visibility level
///
/// `Low` is always 0.0: every reviewable is counted. The other levels have no
/// built-in score, a level without one cannot be selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityThresholds {
    pub medium: Option<f64>,
    pub high: Option<f64>,
}

impl PriorityThresholds {
    pub fn min_score(&self, level: VisibilityLevel) -> Option<f64> {
        match level {
            VisibilityLevel::Low => Some(0.0),
            VisibilityLevel::Medium => self.medium,
            VisibilityLevel::High => self.high,
        }
    }
}

/// Priority floor plus group scoping, the inputs of every visibility check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityThreshold {
    pub min_priority: f64,
    pub group_moderation: bool,
}

impl VisibilityThreshold {
    /// A threshold that counts every pending reviewable
    pub fn disabled(group_moderation: bool) -> Self {
        Self {
            min_priority: 0.0,
            group_moderation,
        }
    }
}

/// Immutable settings for one fan-out run
#[derive(Debug, Clone, PartialEq)]
pub struct NotifySettings {
    pub min_priority: f64,
    pub group_moderation_enabled: bool,
    pub unseen_tracking_enabled: bool,
    pub channel: String,
}

impl NotifySettings {
    pub fn with_min_priority(mut self, min_priority: f64) -> Self {
        self.min_priority = min_priority;
        self
    }

    pub fn with_group_moderation(mut self, enabled: bool) -> Self {
        self.group_moderation_enabled = enabled;
        self
    }

    pub fn with_unseen_tracking(mut self, enabled: bool) -> Self {
        self.unseen_tracking_enabled = enabled;
        self
    }

    pub fn visibility_threshold(&self) -> VisibilityThreshold {
        VisibilityThreshold {
            min_priority: self.min_priority,
            group_moderation: self.group_moderation_enabled,
        }
    }
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            min_priority: 0.0,
            group_moderation_enabled: false,
            unseen_tracking_enabled: false,
            channel: DEFAULT_COUNTS_CHANNEL.to_string(),
        }
    }
}
