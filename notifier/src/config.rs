use std::env;

use anyhow::{Context, Result};

use crate::worker::DEFAULT_QUEUE_CAPACITY;

/// Wiring configuration for a deployed notifier.
///
/// Visibility settings are not part of this: they are read per run through
/// the settings provider.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the message bus publish API
    pub broadcast_url: String,
    pub broadcast_api_key: Option<String>,
    /// Events that may wait for the worker
    pub queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let queue_capacity = match env::var("NOTIFY_WORKER_QUEUE") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("NOTIFY_WORKER_QUEUE is not a number: {}", raw))?,
            Err(_) => DEFAULT_QUEUE_CAPACITY,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            broadcast_url: env::var("BROADCAST_URL")
                .unwrap_or_else(|_| "http://localhost:3000/message-bus".to_string()),
            broadcast_api_key: env::var("BROADCAST_API_KEY").ok(),
            queue_capacity,
        })
    }
}
