// SPDX-License-Identifier: GPL-3.0-only

//! Notification host backed by the desktop notification daemon

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use device_contracts::{HostError, NotificationHost};
use device_types::NotificationContent;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use zbus::zvariant::Value;
use zbus::{Connection, proxy};

use crate::error::Result;

/// Action key of the single notification button.
pub const BUTTON_ACTION: &str = "button";

/// D-Bus proxy for the freedesktop notification specification
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
pub trait Notifications {
    /// Create a notification, or replace the one with `replaces_id`
    #[allow(clippy::too_many_arguments)]
    async fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: HashMap<&str, &Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;

    /// Close a notification
    async fn close_notification(&self, id: u32) -> zbus::Result<()>;

    /// Signal emitted when the user invokes a notification action
    #[zbus(signal)]
    async fn action_invoked(&self, id: u32, action_key: &str) -> zbus::Result<()>;

    /// Signal emitted when a notification goes away for any reason
    #[zbus(signal)]
    async fn notification_closed(&self, id: u32, reason: u32) -> zbus::Result<()>;
}

/// Maps notification identities onto daemon-assigned ids.
///
/// The daemon only knows numeric ids, so the identity → id table doubles as
/// the list of visible notifications.
pub struct FreedesktopNotifications {
    proxy: NotificationsProxy<'static>,
    app_name: String,
    active: Mutex<HashMap<String, u32>>,
}

impl FreedesktopNotifications {
    pub async fn new(connection: &Connection, app_name: impl Into<String>) -> Result<Self> {
        let proxy = NotificationsProxy::new(connection).await?;

        Ok(Self {
            proxy,
            app_name: app_name.into(),
            active: Mutex::new(HashMap::new()),
        })
    }

    fn active(&self) -> MutexGuard<'_, HashMap<String, u32>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn identity_of(&self, server_id: u32) -> Option<String> {
        self.active()
            .iter()
            .find(|(_, id)| **id == server_id)
            .map(|(identity, _)| identity.clone())
    }

    /// Forward button presses on our notifications as identities, and forget
    /// notifications the daemon closed.
    pub async fn watch(self: Arc<Self>, clicks: mpsc::UnboundedSender<String>) -> Result<()> {
        let mut invoked = self.proxy.receive_action_invoked().await?;
        let mut closed = self.proxy.receive_notification_closed().await?;

        let this = Arc::clone(&self);
        tokio::spawn(async move {
            while let Some(signal) = invoked.next().await {
                let args = match signal.args() {
                    Ok(args) => args,
                    Err(e) => {
                        tracing::error!("Failed to parse ActionInvoked signal: {e}");
                        continue;
                    }
                };

                if *args.action_key() != BUTTON_ACTION {
                    continue;
                }

                if let Some(identity) = this.identity_of(*args.id()) {
                    tracing::debug!("Button pressed on {identity}");
                    if clicks.send(identity).is_err() {
                        break;
                    }
                }
            }
        });

        tokio::spawn(async move {
            while let Some(signal) = closed.next().await {
                match signal.args() {
                    Ok(args) => {
                        let server_id = *args.id();
                        self.active().retain(|_, id| *id != server_id);
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse NotificationClosed signal: {e}");
                    }
                }
            }
        });

        tracing::info!("Watching notification actions");
        Ok(())
    }
}

#[async_trait]
impl NotificationHost for FreedesktopNotifications {
    async fn create(
        &self,
        id: &str,
        content: &NotificationContent,
    ) -> std::result::Result<(), HostError> {
        let replaces_id = self.active().get(id).copied().unwrap_or(0);
        let actions: Vec<&str> = match content.button_label.as_deref() {
            Some(label) => vec![BUTTON_ACTION, label],
            None => Vec::new(),
        };

        let server_id = self
            .proxy
            .notify(
                &self.app_name,
                replaces_id,
                &content.icon,
                &content.title,
                &content.message,
                &actions,
                HashMap::new(),
                -1,
            )
            .await
            .map_err(|e| HostError::unavailable(format!("Notify failed for {id}: {e}")))?;

        self.active().insert(id.to_string(), server_id);
        Ok(())
    }

    async fn clear(&self, id: &str) -> std::result::Result<bool, HostError> {
        let server_id = self.active().remove(id);
        let Some(server_id) = server_id else {
            return Ok(false);
        };

        self.proxy
            .close_notification(server_id)
            .await
            .map_err(|e| {
                HostError::unavailable(format!("CloseNotification failed for {id}: {e}"))
            })?;
        Ok(true)
    }

    async fn visible_ids(&self) -> std::result::Result<Vec<String>, HostError> {
        Ok(self.active().keys().cloned().collect())
    }
}
