// SPDX-License-Identifier: GPL-3.0-only

//! Canonical data model for removable device notifications
//!
//! These types are shared between the handler core, its collaborator
//! contracts and any host bridge that feeds events in:
//!
//! - **device-contracts**: collaborator traits take and return these types
//! - **device-handler**: routes the inbound events and emits the outbound ones
//!
//! ## Event flow
//!
//! - `HostEvent` → everything the host platform can tell the handler
//! - `NavigationRequest` → what the handler tells the rest of the application
//!
//! Wire names follow the host's camelCase JSON shapes.

pub mod device;
pub mod event;
pub mod navigation;
pub mod notification;
pub mod volume;

pub use device::{MountStatus, VolumeMetadata};
pub use event::{
    DeviceChangedEvent, DeviceEventKind, HostEvent, MountCompletedEvent, MountCompletionStatus,
    MountEventType, NotificationButtonClicked,
};
pub use navigation::NavigationRequest;
pub use notification::{NotificationContent, NotificationId, NotificationKind};
pub use volume::{DirectoryHandle, VolumeHandle};
