//! Tracing setup for processes embedding the notifier

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global fmt subscriber filtered by `RUST_LOG`,
/// defaulting to `info,reviewable_notifier=debug`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,reviewable_notifier=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
