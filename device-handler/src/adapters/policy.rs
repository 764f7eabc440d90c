// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;
use device_contracts::{HostError, ImportPolicy};
use device_types::VolumeHandle;

use crate::config::ImportSettings;

/// Import policy answered from the handler configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredImportPolicy {
    settings: ImportSettings,
}

impl ConfiguredImportPolicy {
    pub fn new(settings: ImportSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ImportPolicy for ConfiguredImportPolicy {
    async fn is_import_enabled(&self) -> Result<bool, HostError> {
        Ok(self.settings.enabled)
    }

    async fn is_volume_import_eligible(&self, volume: &VolumeHandle) -> Result<bool, HostError> {
        Ok(self
            .settings
            .eligible_roots
            .iter()
            .any(|root| volume.mount_path.starts_with(root)))
    }

    async fn is_companion_app_handling_import(&self) -> Result<bool, HostError> {
        Ok(self.settings.companion_app_handles_import)
    }
}
