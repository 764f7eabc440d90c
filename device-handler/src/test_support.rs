// SPDX-License-Identifier: GPL-3.0-only

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use device_contracts::{HostError, ImportPolicy, NotificationHost, VolumeQueries};
use device_types::{DirectoryHandle, NotificationContent, VolumeHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Create { id: String, message: String },
    Clear { id: String },
    Visible,
}

/// In-memory notification service recording every call.
#[derive(Default)]
pub struct FakeNotificationHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
    visible: Arc<Mutex<BTreeSet<String>>>,
    create_delay: Mutex<Option<Duration>>,
    fail_creates: Mutex<bool>,
}

impl FakeNotificationHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_create_delay(&self, delay: Duration) {
        *self.create_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_fail_creates(&self, fail: bool) {
        *self.fail_creates.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates_for(&self, id: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Create { id: created, message } if created == id => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn visible(&self) -> Vec<String> {
        self.visible.lock().unwrap().iter().cloned().collect()
    }
}

#[async_trait]
impl NotificationHost for FakeNotificationHost {
    async fn create(&self, id: &str, content: &NotificationContent) -> Result<(), HostError> {
        let delay = *self.create_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.calls.lock().unwrap().push(HostCall::Create {
            id: id.to_string(),
            message: content.message.clone(),
        });

        if *self.fail_creates.lock().unwrap() {
            return Err(HostError::unavailable("notification service offline"));
        }

        self.visible.lock().unwrap().insert(id.to_string());
        Ok(())
    }

    async fn clear(&self, id: &str) -> Result<bool, HostError> {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Clear { id: id.to_string() });
        Ok(self.visible.lock().unwrap().remove(id))
    }

    async fn visible_ids(&self) -> Result<Vec<String>, HostError> {
        self.calls.lock().unwrap().push(HostCall::Visible);
        Ok(self.visible())
    }
}

/// Volumes keyed by id, each with a set of top-level directories.
#[derive(Default)]
pub struct FakeVolumes {
    volumes: Mutex<Vec<(String, HashSet<String>)>>,
    fail_root: Mutex<bool>,
}

impl FakeVolumes {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_volume(&self, volume_id: &str, directories: &[&str]) {
        self.volumes.lock().unwrap().push((
            volume_id.to_string(),
            directories.iter().map(|dir| dir.to_string()).collect(),
        ));
    }

    pub fn set_fail_root(&self, fail: bool) {
        *self.fail_root.lock().unwrap() = fail;
    }
}

#[async_trait]
impl VolumeQueries for FakeVolumes {
    async fn resolve_volume(&self, volume_id: &str) -> Result<VolumeHandle, HostError> {
        self.volumes
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == volume_id)
            .map(|(id, _)| VolumeHandle {
                volume_id: id.clone(),
                mount_path: PathBuf::from("/media").join(id),
            })
            .ok_or_else(|| HostError::not_found(format!("volume {volume_id}")))
    }

    async fn resolve_display_root(
        &self,
        volume: &VolumeHandle,
    ) -> Result<DirectoryHandle, HostError> {
        if *self.fail_root.lock().unwrap() {
            return Err(HostError::unavailable("volume went away"));
        }
        Ok(DirectoryHandle::root(volume.volume_id.clone()))
    }

    async fn get_subdirectory(
        &self,
        parent: &DirectoryHandle,
        name: &str,
    ) -> Result<DirectoryHandle, HostError> {
        let exists = self
            .volumes
            .lock()
            .unwrap()
            .iter()
            .any(|(id, dirs)| id == &parent.volume_id && dirs.contains(name));

        if exists {
            Ok(parent.child(name))
        } else {
            Err(HostError::not_found(format!("{name} on {}", parent.volume_id)))
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FakePolicy {
    pub import_enabled: bool,
    pub eligible: bool,
    pub companion_app: bool,
}

impl Default for FakePolicy {
    fn default() -> Self {
        Self {
            import_enabled: true,
            eligible: true,
            companion_app: false,
        }
    }
}

#[async_trait]
impl ImportPolicy for FakePolicy {
    async fn is_import_enabled(&self) -> Result<bool, HostError> {
        Ok(self.import_enabled)
    }

    async fn is_volume_import_eligible(&self, _volume: &VolumeHandle) -> Result<bool, HostError> {
        Ok(self.eligible)
    }

    async fn is_companion_app_handling_import(&self) -> Result<bool, HostError> {
        Ok(self.companion_app)
    }
}
