// SPDX-License-Identifier: GPL-3.0-only

//! Desktop implementations of the host contracts

pub mod freedesktop;
pub mod mounts;
pub mod policy;

pub use freedesktop::FreedesktopNotifications;
pub use mounts::MountedVolumes;
pub use policy::ConfiguredImportPolicy;
