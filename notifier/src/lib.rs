//! Reviewable Notifier
//!
//! Pushes per-user counts of the moderation queue to staff and group
//! moderators whenever a reviewable is created or changes. Every event
//! triggers a full recount of what each recipient may see, recipients with
//! identical counts share one message, and an optional unseen count is
//! derived from each user's last-seen watermark.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::sync::Arc;

use anyhow::Context;
use sea_orm::Database;
use tokio::task::JoinHandle;

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod telemetry;
pub mod worker;

#[cfg(test)]
mod test_utils;


pub use adapters::{
    EnvSettingsProvider, HttpBroadcaster, LocalBroadcaster, PostgresReviewableStore,
    StaticSettingsProvider,
};
pub use app::{NotifyReport, NotifyReviewableService};
pub use config::Config;
pub use domain::entities::{CountPayload, NotifySettings, ReviewableId, UserId};
pub use error::NotifyError;
pub use worker::{NotifyHandle, NotifyWorker};

/// Notifier wired to PostgreSQL, environment settings and the HTTP message bus
pub type DefaultNotifyService =
    NotifyReviewableService<PostgresReviewableStore, EnvSettingsProvider, HttpBroadcaster>;

/// Connect the default adapters and start the worker.
pub async fn start(config: &Config) -> anyhow::Result<(NotifyHandle, JoinHandle<()>)> {
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let broadcaster = HttpBroadcaster::new(
        &config.broadcast_url,
        config.broadcast_api_key.as_deref(),
    )?;

    let service: Arc<DefaultNotifyService> = Arc::new(NotifyReviewableService::new(
        Arc::new(PostgresReviewableStore::new(db)),
        Arc::new(EnvSettingsProvider::new()),
        Arc::new(broadcaster),
    ));

    Ok(NotifyWorker::spawn(service, config.queue_capacity))
}
