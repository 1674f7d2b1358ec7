//! Notify worker
//!
//! In-process job queue in front of [`NotifyReviewableService`]. The event
//! layer calls [`NotifyHandle::on_reviewable_changed`]; every queued id runs
//! as its own task, so runs for different events overlap freely.
//!
//! ```text
//!   event layer ──► NotifyHandle ──► mpsc queue ──► worker loop ──► spawn(run) × N
//! ```
//!
//! The worker stops once every handle is dropped and in-flight runs finish.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use crate::app::NotifyReviewableService;
use crate::domain::entities::ReviewableId;
use crate::domain::ports::{CountBroadcaster, ReviewableStore, SettingsProvider};

/// Default number of events that may wait in the queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum EnqueueError {
    #[error("Notify worker has stopped")]
    Closed,
}

/// Cloneable trigger for the worker
#[derive(Debug, Clone)]
pub struct NotifyHandle {
    tx: mpsc::Sender<ReviewableId>,
}

impl NotifyHandle {
    /// Queue a fan-out run for `reviewable_id`. Waits while the queue is full.
    pub async fn on_reviewable_changed(
        &self,
        reviewable_id: ReviewableId,
    ) -> Result<(), EnqueueError> {
        self.tx
            .send(reviewable_id)
            .await
            .map_err(|_| EnqueueError::Closed)
    }
}

/// Background worker running fan-out jobs
pub struct NotifyWorker;

impl NotifyWorker {
    /// Spawn the worker loop on the current runtime.
    pub fn spawn<S, P, B>(
        service: Arc<NotifyReviewableService<S, P, B>>,
        capacity: usize,
    ) -> (NotifyHandle, JoinHandle<()>)
    where
        S: ReviewableStore + 'static,
        P: SettingsProvider + 'static,
        B: CountBroadcaster + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let join = tokio::spawn(Self::run(service, rx));
        (NotifyHandle { tx }, join)
    }

    async fn run<S, P, B>(
        service: Arc<NotifyReviewableService<S, P, B>>,
        mut rx: mpsc::Receiver<ReviewableId>,
    ) where
        S: ReviewableStore + 'static,
        P: SettingsProvider + 'static,
        B: CountBroadcaster + 'static,
    {
        tracing::info!("Notify worker started");
        let mut runs = JoinSet::new();

        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(reviewable_id) => {
                        let service = service.clone();
                        runs.spawn(async move { service.handle_event(reviewable_id).await });
                    }
                    None => break,
                },
                Some(finished) = runs.join_next(), if !runs.is_empty() => {
                    if let Err(e) = finished {
                        tracing::error!("Notify run panicked: {}", e);
                    }
                }
            }
        }

        while let Some(finished) = runs.join_next().await {
            if let Err(e) = finished {
                tracing::error!("Notify run panicked: {}", e);
            }
        }
        tracing::info!("Notify worker stopped");
    }
}
