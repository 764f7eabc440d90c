// SPDX-License-Identifier: GPL-3.0-only

//! Removable device notification handler
//!
//! Turns the host's per-partition mount results and device events into one
//! coherent notification per device, and opens media cards straight into
//! their media folder.
//!
//! - [`router::DeviceEventRouter`] receives every host event
//! - [`mount_status::MountStatusTracker`] aggregates partition results
//! - [`notification::NotificationCenter`] serializes host notification calls
//! - [`auto_import::AutoImportPipeline`] decides what a fresh mount opens

pub mod adapters;
pub mod auto_import;
pub mod config;
pub mod error;
pub mod mount_status;
pub mod notification;
pub mod queue;
pub mod router;

#[cfg(test)]
mod test_support;

pub use auto_import::{AutoImportPipeline, ImportDecision};
pub use config::HandlerConfig;
pub use error::{HandlerError, Result};
pub use mount_status::{FailureMessage, MountStatusTracker, MountUpdate, NotificationAction};
pub use notification::{NotificationCenter, NotificationChannel};
pub use queue::SequencedActionQueue;
pub use router::DeviceEventRouter;
