// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Live handle of a mounted volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeHandle {
    pub volume_id: String,

    /// Where the volume is mounted on the local filesystem
    pub mount_path: PathBuf,
}

/// Directory on a volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryHandle {
    pub volume_id: String,

    /// Path relative to the volume root, always starting with `/`
    pub full_path: String,
}

impl DirectoryHandle {
    pub fn root(volume_id: impl Into<String>) -> Self {
        Self {
            volume_id: volume_id.into(),
            full_path: "/".to_string(),
        }
    }

    /// Handle of a direct child directory.
    pub fn child(&self, name: &str) -> Self {
        let full_path = if self.full_path.ends_with('/') {
            format!("{}{name}", self.full_path)
        } else {
            format!("{}/{name}", self.full_path)
        };

        Self {
            volume_id: self.volume_id.clone(),
            full_path,
        }
    }
}
