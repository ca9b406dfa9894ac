//! Best-effort push delivery.
//!
//! [`PushGateway`] makes exactly one provider call per message and swallows every
//! failure. [`PushDispatcher`] moves that call off the request path: handlers
//! enqueue a [`PushJob`] and a single worker task drains the queue.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::repository::PushDispatchPort;
use crate::domain::types::PushJob;

/// Push provider send call.
pub trait PushSender: Send + Sync + 'static {
    /// Deliver `message` to one device. Returns the provider message id.
    fn send(
        &self,
        token: &str,
        message: &str,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Wraps a [`PushSender`] with the fire-and-forget failure policy.
pub struct PushGateway<S: PushSender> {
    sender: S,
}

impl<S: PushSender> PushGateway<S> {
    pub fn new(sender: S) -> Self {
        Self { sender }
    }

    /// One attempt, no retry. Failures are logged at error level and dropped.
    pub async fn send_push_notification(&self, token: &str, message: &str) {
        match self.sender.send(token, message).await {
            Ok(message_id) => info!(%message_id, "push notification sent"),
            Err(e) => error!(error = %e, "push notification failed"),
        }
    }
}

/// Enqueue side of the push worker. Cheap to clone.
#[derive(Clone)]
pub struct PushDispatcher {
    tx: Option<mpsc::Sender<PushJob>>,
}

impl PushDispatcher {
    /// Start the worker task that owns `gateway` and return the enqueue handle.
    pub fn spawn<S: PushSender>(
        gateway: PushGateway<S>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run_worker(gateway, rx));
        (Self { tx: Some(tx) }, handle)
    }

    /// Dispatcher used when no push provider is configured; jobs are dropped.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }
}

impl PushDispatchPort for PushDispatcher {
    fn dispatch(&self, job: PushJob) {
        let Some(tx) = &self.tx else {
            debug!("push delivery disabled, dropping job");
            return;
        };
        if let Err(e) = tx.try_send(job) {
            match e {
                mpsc::error::TrySendError::Full(_) => warn!("push queue full, dropping job"),
                mpsc::error::TrySendError::Closed(_) => warn!("push worker stopped, dropping job"),
            }
        }
    }
}

async fn run_worker<S: PushSender>(gateway: PushGateway<S>, mut rx: mpsc::Receiver<PushJob>) {
    info!("push worker started");
    while let Some(job) = rx.recv().await {
        gateway
            .send_push_notification(&job.token, &job.message)
            .await;
    }
    info!("push worker stopped (channel closed)");
}
