// SPDX-License-Identifier: GPL-3.0-only

pub mod error;
pub mod traits;

pub use error::{HostError, HostErrorKind};
pub use traits::{ImportPolicy, NotificationHost, VolumeQueries};
