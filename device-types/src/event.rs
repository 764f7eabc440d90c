// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::VolumeMetadata;

/// Type of a device-changed event.
///
/// Unrecognised names are kept verbatim in `Unknown` so the router can report
/// them instead of failing to parse the whole event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceEventKind {
    Disabled,
    Removed,
    HardUnplugged,
    FormatStart,
    FormatSuccess,
    FormatFail,
    Unknown(String),
}

impl DeviceEventKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Disabled => "disabled",
            Self::Removed => "removed",
            Self::HardUnplugged => "hard_unplugged",
            Self::FormatStart => "format_start",
            Self::FormatSuccess => "format_success",
            Self::FormatFail => "format_fail",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for DeviceEventKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "disabled" => Self::Disabled,
            "removed" => Self::Removed,
            "hard_unplugged" => Self::HardUnplugged,
            "format_start" => Self::FormatStart,
            "format_success" => Self::FormatSuccess,
            "format_fail" => Self::FormatFail,
            _ => Self::Unknown(value),
        }
    }
}

impl From<DeviceEventKind> for String {
    fn from(value: DeviceEventKind) -> Self {
        match value {
            DeviceEventKind::Unknown(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// Single-shot device state change reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceChangedEvent {
    #[serde(rename = "type")]
    pub kind: DeviceEventKind,
    pub device_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountEventType {
    Mount,
    Unmount,
}

/// Outcome code of a mount or unmount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MountCompletionStatus {
    Success,
    ErrorUnsupportedFilesystem,
    /// Any other error code reported by the host.
    Error(String),
}

impl MountCompletionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<String> for MountCompletionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => Self::Success,
            "error_unsupported_filesystem" => Self::ErrorUnsupportedFilesystem,
            _ => Self::Error(value),
        }
    }
}

impl From<MountCompletionStatus> for String {
    fn from(value: MountCompletionStatus) -> Self {
        match value {
            MountCompletionStatus::Success => "success".to_string(),
            MountCompletionStatus::ErrorUnsupportedFilesystem => {
                "error_unsupported_filesystem".to_string()
            }
            MountCompletionStatus::Error(code) => code,
        }
    }
}

/// Result of mounting or unmounting one volume (usually one partition).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountCompletedEvent {
    pub event_type: MountEventType,
    pub status: MountCompletionStatus,
    #[serde(default)]
    pub should_notify: bool,
    pub volume_metadata: VolumeMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationButtonClicked {
    pub notification_id: String,
}

/// Everything the host platform can deliver to the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum HostEvent {
    DeviceChanged(DeviceChangedEvent),
    MountCompleted(MountCompletedEvent),
    NotificationButtonClicked(NotificationButtonClicked),
}
