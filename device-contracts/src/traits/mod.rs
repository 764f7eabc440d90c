// SPDX-License-Identifier: GPL-3.0-only

pub mod notifications;
pub mod volumes;

pub use notifications::NotificationHost;
pub use volumes::{ImportPolicy, VolumeQueries};
