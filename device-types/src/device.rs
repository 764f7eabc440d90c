// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Aggregate mount result for one physical device.
///
/// A multi-partition device reports one mount result per partition. This
/// status records what has been observed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MountStatus {
    /// No mount result has been seen for the device.
    #[default]
    NoResult,

    /// Every result so far succeeded.
    Success,

    /// Only the parent (partition table) entry failed. A later partition
    /// result overrides it.
    OnlyParentError,

    /// A single child partition failed.
    ChildError,

    /// Several results were seen and at least one failed. Absorbing.
    MultipartError,
}

/// Volume description attached to each mount-completed event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMetadata {
    /// Host identifier of the physical device (e.g. "/dev/sdb")
    #[serde(default)]
    pub device_path: Option<String>,

    /// Device class such as "usb" or "sd"
    #[serde(default)]
    pub device_type: Option<String>,

    /// Human readable label, if the filesystem carries one
    #[serde(default)]
    pub device_label: Option<String>,

    /// True when the event concerns the whole device rather than a partition
    #[serde(default)]
    pub is_parent_device: bool,

    /// Identifier of the mounted volume
    #[serde(default)]
    pub volume_id: Option<String>,
}

impl VolumeMetadata {
    /// Device path, when the volume belongs to a typed physical device.
    ///
    /// Volumes without both a device type and a device path (network shares,
    /// archives) never produce device notifications.
    pub fn notifiable_device_path(&self) -> Option<&str> {
        match (self.device_type.as_deref(), self.device_path.as_deref()) {
            (Some(device_type), Some(path)) if !device_type.is_empty() && !path.is_empty() => {
                Some(path)
            }
            _ => None,
        }
    }

    /// Label, ignoring empty strings.
    pub fn label(&self) -> Option<&str> {
        self.device_label.as_deref().filter(|label| !label.is_empty())
    }
}
