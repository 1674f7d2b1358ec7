//! Unified error types for the reviewable notifier
//!
//! This module defines error types for each layer:
//! - `DomainError`: Data store errors returned by repository ports
//! - `SettingsError`: Runtime settings could not be read or parsed
//! - `BroadcastError`: Count broadcast transport errors
//! - `NotifyError`: Application layer errors (aborts a whole fan-out run)

use thiserror::Error;

use crate::domain::entities::ReviewableId;

/// Domain layer errors - data store lookups
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Settings errors
///
/// Visibility settings are security relevant, so a malformed or unreadable
/// value is always an error and never replaced by a default.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Setting not available: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },

    #[error("Settings source unavailable: {0}")]
    Unavailable(String),
}

/// Broadcast transport errors
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Application layer errors - a run that fails with one of these publishes nothing
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Stale event: reviewable {0} no longer exists")]
    StaleEvent(ReviewableId),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Store error: {0}")]
    Store(#[from] DomainError),
}

impl NotifyError {
    /// Whether the next triggering event will correct the counts on its own.
    ///
    /// Settings failures are not recoverable: they need an operator.
    pub fn is_recoverable(&self) -> bool {
        match self {
            NotifyError::StaleEvent(_) | NotifyError::Store(_) => true,
            NotifyError::Settings(_) => false,
        }
    }
}
