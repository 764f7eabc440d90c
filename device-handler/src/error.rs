// SPDX-License-Identifier: GPL-3.0-only

use device_contracts::HostError;
use thiserror::Error;

/// Handler-specific errors
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("No volume id associated with event")]
    MissingVolumeId,

    #[error("Import disabled for volume: {0}")]
    ImportDisabled(String),

    #[error("No media folder on volume: {0}")]
    MediaFolderNotFound(String),

    #[error("D-Bus error: {0}")]
    DBus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zbus::Error> for HandlerError {
    fn from(err: zbus::Error) -> Self {
        HandlerError::DBus(err.to_string())
    }
}

impl From<toml::de::Error> for HandlerError {
    fn from(err: toml::de::Error) -> Self {
        HandlerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HandlerError>;
