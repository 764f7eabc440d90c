// SPDX-License-Identifier: GPL-3.0-only

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use device_contracts::{HostError, HostErrorKind, VolumeQueries};
use device_types::{DirectoryHandle, VolumeHandle};

/// Volumes on the local filesystem, identified by their mount point.
#[derive(Debug, Clone, Copy, Default)]
pub struct MountedVolumes;

impl MountedVolumes {
    pub fn new() -> Self {
        Self
    }
}

async fn require_directory(path: &Path) -> Result<(), HostError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(HostError::not_found(format!(
            "{} is not a directory",
            path.display()
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(HostError::not_found(format!("{} does not exist", path.display())))
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(HostError::new(
            HostErrorKind::PermissionDenied,
            format!("{}: {e}", path.display()),
        )),
        Err(e) => Err(HostError::new(
            HostErrorKind::Internal,
            format!("{}: {e}", path.display()),
        )),
    }
}

fn local_path(directory: &DirectoryHandle) -> PathBuf {
    Path::new(&directory.volume_id).join(directory.full_path.trim_start_matches('/'))
}

#[async_trait]
impl VolumeQueries for MountedVolumes {
    async fn resolve_volume(&self, volume_id: &str) -> Result<VolumeHandle, HostError> {
        let mount_path = PathBuf::from(volume_id);
        if !mount_path.is_absolute() {
            return Err(HostError::new(
                HostErrorKind::InvalidInput,
                format!("volume id is not a mount point: {volume_id}"),
            ));
        }

        require_directory(&mount_path).await?;

        Ok(VolumeHandle {
            volume_id: volume_id.to_string(),
            mount_path,
        })
    }

    async fn resolve_display_root(
        &self,
        volume: &VolumeHandle,
    ) -> Result<DirectoryHandle, HostError> {
        require_directory(&volume.mount_path).await?;
        Ok(DirectoryHandle::root(volume.volume_id.clone()))
    }

    async fn get_subdirectory(
        &self,
        parent: &DirectoryHandle,
        name: &str,
    ) -> Result<DirectoryHandle, HostError> {
        let child = parent.child(name);
        require_directory(&local_path(&child)).await?;
        Ok(child)
    }
}
