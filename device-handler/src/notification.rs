// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;
use std::sync::Arc;

use device_contracts::NotificationHost;
use device_types::{NotificationContent, NotificationId, NotificationKind};

use crate::config::{HandlerConfig, NotificationTemplate};
use crate::queue::SequencedActionQueue;

/// One semantic notification kind bound to the host notification service.
///
/// Calls return immediately; the host calls run on the queue shared by every
/// kind with the same identity prefix.
pub struct NotificationChannel {
    kind: NotificationKind,
    template: NotificationTemplate,
    icon: String,
    host: Arc<dyn NotificationHost>,
    queue: Arc<SequencedActionQueue>,
}

impl NotificationChannel {
    pub fn new(
        kind: NotificationKind,
        template: NotificationTemplate,
        icon: impl Into<String>,
        host: Arc<dyn NotificationHost>,
        queue: Arc<SequencedActionQueue>,
    ) -> Self {
        Self {
            kind,
            template,
            icon: icon.into(),
            host,
            queue,
        }
    }

    fn content(&self, message: Option<String>) -> NotificationContent {
        NotificationContent {
            title: self.template.title.clone(),
            message: message.unwrap_or_else(|| self.template.message.clone()),
            icon: self.icon.clone(),
            button_label: self.template.button_label.clone(),
        }
    }

    /// Create or update the notification for `device_path`.
    pub fn show(&self, device_path: &str, message: Option<String>) -> NotificationId {
        let id = self.kind.id_for(device_path);
        let key = id.to_string();
        let content = self.content(message);
        let host = Arc::clone(&self.host);

        tracing::debug!("Queueing show of {key}");
        self.queue.run(async move {
            if let Err(e) = host.create(&key, &content).await {
                tracing::warn!("Failed to show notification {key}: {e}");
            }
        });

        id
    }

    /// Create the notification unless one with the same identity is visible.
    pub fn show_once(&self, device_path: &str) -> NotificationId {
        let id = self.kind.id_for(device_path);
        let key = id.to_string();
        let content = self.content(None);
        let host = Arc::clone(&self.host);

        self.queue.run(async move {
            match host.visible_ids().await {
                Ok(visible) if visible.iter().any(|visible_id| visible_id == &key) => {
                    tracing::debug!("Notification {key} already visible");
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Failed to list visible notifications: {e}");
                }
            }

            if let Err(e) = host.create(&key, &content).await {
                tracing::warn!("Failed to show notification {key}: {e}");
            }
        });

        id
    }

    /// Clear the notification for `device_path`, if any.
    pub fn hide(&self, device_path: &str) {
        let key = self.kind.id_for(device_path).to_string();
        let host = Arc::clone(&self.host);

        tracing::debug!("Queueing hide of {key}");
        self.queue.run(async move {
            match host.clear(&key).await {
                Ok(true) => tracing::debug!("Cleared notification {key}"),
                Ok(false) => {}
                Err(e) => tracing::warn!("Failed to clear notification {key}: {e}"),
            }
        });
    }
}

/// Every notification channel, one per kind.
pub struct NotificationCenter {
    channels: HashMap<NotificationKind, NotificationChannel>,
    queues: Vec<Arc<SequencedActionQueue>>,
}

impl NotificationCenter {
    pub fn new(host: Arc<dyn NotificationHost>, config: &HandlerConfig) -> Self {
        let mut queues: HashMap<&'static str, Arc<SequencedActionQueue>> = HashMap::new();

        let channels = NotificationKind::ALL
            .into_iter()
            .map(|kind| {
                let queue = queues
                    .entry(kind.prefix())
                    .or_insert_with(|| Arc::new(SequencedActionQueue::new(kind.prefix())))
                    .clone();
                let channel = NotificationChannel::new(
                    kind,
                    config.messages.template(kind).clone(),
                    config.icon.clone(),
                    Arc::clone(&host),
                    queue,
                );
                (kind, channel)
            })
            .collect();

        Self {
            channels,
            queues: queues.into_values().collect(),
        }
    }

    pub fn channel(&self, kind: NotificationKind) -> &NotificationChannel {
        &self.channels[&kind]
    }

    /// Wait for every queued notification call to finish.
    pub async fn flush(&self) {
        for queue in &self.queues {
            queue.flush().await;
        }
    }
}
