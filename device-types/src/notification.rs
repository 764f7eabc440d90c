// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic notification kinds raised for removable devices.
///
/// Several kinds may share an identity prefix, in which case they address the
/// same host notification and replace one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    DeviceNavigation,
    DeviceImport,
    DeviceFail,
    DeviceFailUnknown,
    DeviceExternalStorageDisabled,
    DeviceHardUnplugged,
    FormatStart,
    FormatSuccess,
    FormatFail,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 9] = [
        Self::DeviceNavigation,
        Self::DeviceImport,
        Self::DeviceFail,
        Self::DeviceFailUnknown,
        Self::DeviceExternalStorageDisabled,
        Self::DeviceHardUnplugged,
        Self::FormatStart,
        Self::FormatSuccess,
        Self::FormatFail,
    ];

    pub const NAVIGATION_PREFIX: &'static str = "deviceNavigation";
    pub const IMPORT_PREFIX: &'static str = "deviceImport";
    pub const FAIL_PREFIX: &'static str = "deviceFail";

    /// Identity prefix of the host notification this kind writes to.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::DeviceNavigation => Self::NAVIGATION_PREFIX,
            Self::DeviceImport => Self::IMPORT_PREFIX,
            Self::DeviceFail | Self::DeviceFailUnknown | Self::DeviceExternalStorageDisabled => {
                Self::FAIL_PREFIX
            }
            Self::DeviceHardUnplugged => "hardUnplugged",
            Self::FormatStart => "formatStart",
            Self::FormatSuccess => "formatSuccess",
            Self::FormatFail => "formatFail",
        }
    }

    pub fn id_for(self, device_path: &str) -> NotificationId {
        NotificationId::new(self.prefix(), device_path)
    }
}

/// Stable identity of one logical notification: `<prefix>:<device path>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationId {
    prefix: String,
    device_path: String,
}

impl NotificationId {
    pub fn new(prefix: impl Into<String>, device_path: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            device_path: device_path.into(),
        }
    }

    /// Split an identity at its first `:`. Device paths may contain further colons.
    pub fn parse(id: &str) -> Option<Self> {
        let (prefix, device_path) = id.split_once(':')?;
        Some(Self::new(prefix, device_path))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.device_path)
    }
}

impl TryFrom<String> for NotificationId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("notification id without prefix: {value}"))
    }
}

impl From<NotificationId> for String {
    fn from(value: NotificationId) -> Self {
        value.to_string()
    }
}

/// Fully rendered notification handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
    pub icon: String,
    #[serde(default)]
    pub button_label: Option<String>,
}
