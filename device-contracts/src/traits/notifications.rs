// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;

use device_types::NotificationContent;

use crate::HostError;

/// Host notification service.
///
/// Ids are the handler's notification identities (`<prefix>:<device path>`).
/// Creating an id that is already visible updates it in place.
#[async_trait]
pub trait NotificationHost: Send + Sync {
    async fn create(&self, id: &str, content: &NotificationContent) -> Result<(), HostError>;

    /// Returns whether a notification was actually removed.
    async fn clear(&self, id: &str) -> Result<bool, HostError>;

    async fn visible_ids(&self) -> Result<Vec<String>, HostError>;
}
