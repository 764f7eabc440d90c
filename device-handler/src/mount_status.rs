// SPDX-License-Identifier: GPL-3.0-only

//! Per-device aggregation of partition mount results
//!
//! A device with several partitions reports one mount result per partition,
//! in no particular order. The tracker folds those results into one
//! `MountStatus` per device path and decides which failure notification, if
//! any, reflects the aggregate.

use std::collections::HashMap;

use device_types::{
    MountCompletedEvent, MountCompletionStatus, MountEventType, MountStatus, NotificationKind,
};

/// Message override for a failure notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureMessage {
    /// The filesystem is not supported.
    Unsupported { label: Option<String> },
    /// Any other mount error.
    Unknown { label: Option<String> },
    /// At least one of several partitions failed.
    Multipart { label: Option<String> },
}

impl FailureMessage {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Unsupported { label } | Self::Unknown { label } | Self::Multipart { label } => {
                label.as_deref()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationAction {
    Show {
        kind: NotificationKind,
        device_path: String,
        message: Option<FailureMessage>,
    },
    Hide {
        kind: NotificationKind,
        device_path: String,
    },
}

/// Outcome of applying one mount result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountUpdate {
    pub status: MountStatus,
    pub actions: Vec<NotificationAction>,
}

#[derive(Debug, Default)]
pub struct MountStatusTracker {
    statuses: HashMap<String, MountStatus>,
}

impl MountStatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status; `NoResult` for untracked devices.
    pub fn status(&self, device_path: &str) -> MountStatus {
        self.statuses
            .get(device_path)
            .copied()
            .unwrap_or(MountStatus::NoResult)
    }

    pub fn tracked_devices(&self) -> usize {
        self.statuses.len()
    }

    /// Fold one mount result into the device status.
    ///
    /// Returns `None` when the event does not concern a notifiable device.
    pub fn apply(&mut self, event: &MountCompletedEvent) -> Option<MountUpdate> {
        let volume = &event.volume_metadata;
        if !event.should_notify {
            return None;
        }
        let device_path = volume.notifiable_device_path()?.to_string();

        let current = self.status(&device_path);
        let mut actions = Vec::new();

        let next = match current {
            MountStatus::MultipartError => {
                return Some(MountUpdate {
                    status: current,
                    actions,
                });
            }
            MountStatus::NoResult => first_status(event),
            MountStatus::OnlyParentError => {
                // The parent entry holds the partition table and is expected to fail
                // once a partition result shows up.
                if !volume.is_parent_device {
                    actions.push(NotificationAction::Hide {
                        kind: NotificationKind::DeviceFail,
                        device_path: device_path.clone(),
                    });
                }
                first_status(event)
            }
            MountStatus::Success | MountStatus::ChildError => {
                if current == MountStatus::Success && event.status.is_success() {
                    MountStatus::Success
                } else {
                    MountStatus::MultipartError
                }
            }
        };

        tracing::debug!("Mount status of {device_path}: {current:?} -> {next:?}");
        self.statuses.insert(device_path.clone(), next);

        if event.event_type == MountEventType::Unmount {
            return Some(MountUpdate {
                status: next,
                actions,
            });
        }

        let label = volume.label().map(str::to_string);
        match next {
            MountStatus::MultipartError => actions.push(NotificationAction::Show {
                kind: NotificationKind::DeviceFail,
                device_path,
                message: Some(FailureMessage::Multipart { label }),
            }),
            MountStatus::ChildError | MountStatus::OnlyParentError => {
                let action = if event.status == MountCompletionStatus::ErrorUnsupportedFilesystem {
                    NotificationAction::Show {
                        kind: NotificationKind::DeviceFail,
                        device_path,
                        message: Some(FailureMessage::Unsupported { label }),
                    }
                } else {
                    NotificationAction::Show {
                        kind: NotificationKind::DeviceFailUnknown,
                        device_path,
                        message: Some(FailureMessage::Unknown { label }),
                    }
                };
                actions.push(action);
            }
            MountStatus::NoResult | MountStatus::Success => {}
        }

        Some(MountUpdate {
            status: next,
            actions,
        })
    }

    /// Forget a device. Returns its last status, if any was tracked.
    pub fn remove(&mut self, device_path: &str) -> Option<MountStatus> {
        self.statuses.remove(device_path)
    }
}

fn first_status(event: &MountCompletedEvent) -> MountStatus {
    if event.status.is_success() {
        MountStatus::Success
    } else if event.volume_metadata.is_parent_device {
        MountStatus::OnlyParentError
    } else {
        MountStatus::ChildError
    }
}
