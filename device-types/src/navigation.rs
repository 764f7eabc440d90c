// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Request for the file browser to open a device or a folder on a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_id: Option<String>,

    /// Path inside the volume to open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl NavigationRequest {
    /// Open the root of the device.
    pub fn device(device_path: impl Into<String>) -> Self {
        Self {
            device_path: Some(device_path.into()),
            ..Default::default()
        }
    }

    /// Open a folder on the device.
    pub fn device_folder(device_path: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            device_path: Some(device_path.into()),
            file_path: Some(file_path.into()),
            ..Default::default()
        }
    }

    /// Open a folder on an already resolved volume.
    pub fn volume_folder(volume_id: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            volume_id: Some(volume_id.into()),
            file_path: Some(file_path.into()),
            ..Default::default()
        }
    }
}
