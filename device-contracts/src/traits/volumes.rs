// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;

use device_types::{DirectoryHandle, VolumeHandle};

use crate::HostError;

#[async_trait]
pub trait VolumeQueries: Send + Sync {
    /// Fails with `NotFound` when no volume has this id.
    async fn resolve_volume(&self, volume_id: &str) -> Result<VolumeHandle, HostError>;

    async fn resolve_display_root(
        &self,
        volume: &VolumeHandle,
    ) -> Result<DirectoryHandle, HostError>;

    /// Fails with `NotFound` when `name` is missing or not a directory.
    async fn get_subdirectory(
        &self,
        parent: &DirectoryHandle,
        name: &str,
    ) -> Result<DirectoryHandle, HostError>;
}

#[async_trait]
pub trait ImportPolicy: Send + Sync {
    async fn is_import_enabled(&self) -> Result<bool, HostError>;

    async fn is_volume_import_eligible(&self, volume: &VolumeHandle) -> Result<bool, HostError>;

    /// True when a companion application already auto-imports from new media.
    async fn is_companion_app_handling_import(&self) -> Result<bool, HostError>;
}
