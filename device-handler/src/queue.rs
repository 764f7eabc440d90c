// SPDX-License-Identifier: GPL-3.0-only

//! Sequenced execution of asynchronous actions
//!
//! Every notification identity prefix owns one queue, so a show submitted
//! before a hide for the same host notification always reaches the host first.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};

pub type Action = BoxFuture<'static, ()>;

/// Runs asynchronous actions one at a time, in submission order.
///
/// The next action starts only after the previous one has completed. An action
/// that fails (or panics) does not affect the ones queued after it.
///
/// Must be created from within a tokio runtime: the worker task is spawned on
/// construction and ends when the queue is dropped.
pub struct SequencedActionQueue {
    name: String,
    sender: mpsc::UnboundedSender<Action>,
}

impl SequencedActionQueue {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let (sender, mut receiver) = mpsc::unbounded_channel::<Action>();

        let worker_name = name.clone();
        tokio::spawn(async move {
            while let Some(action) = receiver.recv().await {
                if AssertUnwindSafe(action).catch_unwind().await.is_err() {
                    tracing::error!(queue = %worker_name, "Queued action panicked");
                }
            }
            tracing::trace!(queue = %worker_name, "Action queue closed");
        });

        Self { name, sender }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueue an action. Returns immediately.
    pub fn run<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.sender.send(Box::pin(action)).is_err() {
            tracing::warn!(queue = %self.name, "Action queue worker is gone, dropping action");
        }
    }

    /// Wait until every action submitted before this call has completed.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        self.run(async move {
            let _ = done.send(());
        });
        let _ = wait.await;
    }
}
