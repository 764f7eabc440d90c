// SPDX-License-Identifier: GPL-3.0-only

//! Decide what happens after a removable volume mounts successfully
//!
//! Media cards get opened straight into their media folder, unless a
//! companion application already takes care of importing. Everything else,
//! and every failure along the way, falls back to the navigation notification.

use std::sync::Arc;

use device_contracts::{ImportPolicy, VolumeQueries};
use device_types::{
    DirectoryHandle, NavigationRequest, NotificationKind, VolumeHandle, VolumeMetadata,
};
use futures_util::future::join_all;
use tokio::sync::mpsc;

use crate::error::{HandlerError, Result};
use crate::notification::NotificationCenter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDecision {
    /// Open the file browser in this folder.
    OpenMediaFolder {
        volume_id: String,
        folder: DirectoryHandle,
    },
    /// A companion application handles the volume; do nothing.
    CompanionHandles,
}

pub struct AutoImportPipeline {
    volumes: Arc<dyn VolumeQueries>,
    policy: Arc<dyn ImportPolicy>,
    media_folders: Vec<String>,
}

impl AutoImportPipeline {
    pub fn new(
        volumes: Arc<dyn VolumeQueries>,
        policy: Arc<dyn ImportPolicy>,
        media_folders: Vec<String>,
    ) -> Self {
        Self {
            volumes,
            policy,
            media_folders,
        }
    }

    /// Run every stage in order. The first failing stage ends the pipeline.
    pub async fn decide(&self, metadata: &VolumeMetadata) -> Result<ImportDecision> {
        let volume = self.resolve_volume(metadata).await?;
        self.check_import_enabled(&volume).await?;
        let folder = self.find_media_folder(&volume).await?;

        if self.policy.is_companion_app_handling_import().await? {
            return Ok(ImportDecision::CompanionHandles);
        }

        Ok(ImportDecision::OpenMediaFolder {
            volume_id: volume.volume_id,
            folder,
        })
    }

    /// Decide, then act on the decision or fall back to the navigation notification.
    pub async fn run(
        &self,
        metadata: VolumeMetadata,
        notifications: &NotificationCenter,
        navigation: &mpsc::UnboundedSender<NavigationRequest>,
    ) {
        match self.decide(&metadata).await {
            Ok(ImportDecision::OpenMediaFolder { volume_id, folder }) => {
                tracing::info!("Opening {} on volume {volume_id}", folder.full_path);
                let request = NavigationRequest::volume_folder(volume_id, folder.full_path);
                if navigation.send(request).is_err() {
                    tracing::warn!("Navigation receiver is gone, dropping request");
                }
            }
            Ok(ImportDecision::CompanionHandles) => {
                tracing::debug!(
                    "Companion app imports from {:?}, not opening a window",
                    metadata.volume_id
                );
            }
            Err(e) => {
                tracing::debug!("No auto-open for {:?}: {e}", metadata.volume_id);
                if let Some(device_path) = metadata.notifiable_device_path() {
                    notifications
                        .channel(NotificationKind::DeviceNavigation)
                        .show(device_path, None);
                }
            }
        }
    }

    async fn resolve_volume(&self, metadata: &VolumeMetadata) -> Result<VolumeHandle> {
        let volume_id = metadata
            .volume_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(HandlerError::MissingVolumeId)?;

        Ok(self.volumes.resolve_volume(volume_id).await?)
    }

    async fn check_import_enabled(&self, volume: &VolumeHandle) -> Result<()> {
        let enabled = self.policy.is_import_enabled().await?
            && self.policy.is_volume_import_eligible(volume).await?;

        if enabled {
            Ok(())
        } else {
            Err(HandlerError::ImportDisabled(volume.volume_id.clone()))
        }
    }

    async fn find_media_folder(&self, volume: &VolumeHandle) -> Result<DirectoryHandle> {
        let root = self.volumes.resolve_display_root(volume).await?;

        let probes = self
            .media_folders
            .iter()
            .map(|name| self.volumes.get_subdirectory(&root, name));
        let results = join_all(probes).await;

        for (name, result) in self.media_folders.iter().zip(results) {
            match result {
                Ok(folder) => return Ok(folder),
                Err(e) => tracing::trace!("No {name} on {}: {e}", volume.volume_id),
            }
        }

        Err(HandlerError::MediaFolderNotFound(volume.volume_id.clone()))
    }
}
