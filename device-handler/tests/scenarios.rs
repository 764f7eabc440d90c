// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end routing of host events through the filesystem adapters.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use device_contracts::{HostError, NotificationHost};
use device_handler::adapters::{ConfiguredImportPolicy, MountedVolumes};
use device_handler::config::ImportSettings;
use device_handler::{AutoImportPipeline, DeviceEventRouter, HandlerConfig, NotificationCenter};
use device_types::{HostEvent, MountStatus, NavigationRequest, NotificationContent};
use tokio::sync::mpsc;

static COUNTER: AtomicU64 = AtomicU64::new(1);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new() -> Self {
        let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "device-handler-scenario-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    /// Directory standing in for a mounted volume.
    fn volume(&self, name: &str, folders: &[&str]) -> String {
        let mount = self.path.join(name);
        fs::create_dir_all(&mount).expect("create volume");
        for folder in folders {
            fs::create_dir_all(mount.join(folder)).expect("create folder");
        }
        mount.to_string_lossy().into_owned()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Notification host remembering the last message shown per identity.
#[derive(Default)]
struct RecordingHost {
    visible: Mutex<BTreeMap<String, String>>,
    creates: Mutex<Vec<String>>,
}

impl RecordingHost {
    fn visible(&self) -> BTreeMap<String, String> {
        self.visible.lock().unwrap().clone()
    }

    fn creates(&self) -> Vec<String> {
        self.creates.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationHost for RecordingHost {
    async fn create(&self, id: &str, content: &NotificationContent) -> Result<(), HostError> {
        self.creates.lock().unwrap().push(id.to_string());
        self.visible
            .lock()
            .unwrap()
            .insert(id.to_string(), content.message.clone());
        Ok(())
    }

    async fn clear(&self, id: &str) -> Result<bool, HostError> {
        Ok(self.visible.lock().unwrap().remove(id).is_some())
    }

    async fn visible_ids(&self) -> Result<Vec<String>, HostError> {
        Ok(self.visible.lock().unwrap().keys().cloned().collect())
    }
}

struct Scenario {
    host: Arc<RecordingHost>,
    router: DeviceEventRouter,
    navigation: mpsc::UnboundedReceiver<NavigationRequest>,
    temp: TempDir,
}

impl Scenario {
    fn new() -> Self {
        Self::with_import(true)
    }

    fn with_import(enabled: bool) -> Self {
        let temp = TempDir::new();
        let config = HandlerConfig {
            import: ImportSettings {
                enabled,
                eligible_roots: vec![temp.path.clone()],
                ..Default::default()
            },
            ..Default::default()
        };

        let host = Arc::new(RecordingHost::default());
        let notifications = Arc::new(NotificationCenter::new(host.clone(), &config));
        let pipeline = Arc::new(AutoImportPipeline::new(
            Arc::new(MountedVolumes::new()),
            Arc::new(ConfiguredImportPolicy::new(config.import.clone())),
            config.media_folders.clone(),
        ));
        let (tx, navigation) = mpsc::unbounded_channel();
        let router = DeviceEventRouter::new(&config, notifications, pipeline, tx);

        Self {
            host,
            router,
            navigation,
            temp,
        }
    }

    async fn mount(&self, status: &str, is_parent: bool, volume_id: Option<&str>) {
        let mut metadata = serde_json::json!({
            "devicePath": "/dev/sdb",
            "deviceType": "usb",
            "deviceLabel": "CARD",
            "isParentDevice": is_parent,
        });
        if let Some(volume_id) = volume_id {
            metadata["volumeId"] = volume_id.into();
        }

        let event: HostEvent = serde_json::from_value(serde_json::json!({
            "event": "mount_completed",
            "eventType": "mount",
            "status": status,
            "shouldNotify": true,
            "volumeMetadata": metadata,
        }))
        .expect("valid mount event");

        self.router.dispatch(event);
        self.router.drain().await;
        self.router.notifications().flush().await;
    }
}

#[tokio::test]
async fn single_partition_without_media_falls_back_to_navigation() {
    let mut scenario = Scenario::new();
    let volume = scenario.temp.volume("USB", &["Music"]);

    scenario.mount("success", false, Some(&volume)).await;

    assert_eq!(scenario.router.mount_status("/dev/sdb"), MountStatus::Success);
    let visible = scenario.host.visible();
    assert_eq!(
        visible.keys().collect::<Vec<_>>(),
        vec!["deviceNavigation:/dev/sdb"]
    );
    assert!(scenario.navigation.try_recv().is_err());
}

#[tokio::test]
async fn media_card_opens_its_media_folder() {
    let mut scenario = Scenario::new();
    let volume = scenario.temp.volume("CARD", &["DCIM"]);

    scenario.mount("success", false, Some(&volume)).await;

    assert_eq!(
        scenario.navigation.try_recv().expect("navigation request"),
        NavigationRequest::volume_folder(volume, "/DCIM")
    );
    assert!(scenario.host.visible().is_empty());
}

#[tokio::test]
async fn disabled_import_falls_back_to_navigation() {
    let mut scenario = Scenario::with_import(false);
    let volume = scenario.temp.volume("CARD", &["DCIM"]);

    scenario.mount("success", false, Some(&volume)).await;

    assert_eq!(
        scenario.host.visible().keys().collect::<Vec<_>>(),
        vec!["deviceNavigation:/dev/sdb"]
    );
    assert!(scenario.navigation.try_recv().is_err());
}

#[tokio::test]
async fn parent_error_is_cleared_by_partition_success() {
    let scenario = Scenario::new();
    let volume = scenario.temp.volume("USB", &[]);

    scenario.mount("error_unknown", true, None).await;
    assert_eq!(
        scenario.router.mount_status("/dev/sdb"),
        MountStatus::OnlyParentError
    );
    assert!(scenario.host.visible().contains_key("deviceFail:/dev/sdb"));

    scenario.mount("success", false, Some(&volume)).await;

    assert_eq!(scenario.router.mount_status("/dev/sdb"), MountStatus::Success);
    let visible = scenario.host.visible();
    assert!(!visible.contains_key("deviceFail:/dev/sdb"));
    assert!(visible.contains_key("deviceNavigation:/dev/sdb"));
}

#[tokio::test]
async fn two_failing_partitions_show_one_multipart_notification() {
    let scenario = Scenario::new();

    scenario.mount("error_unsupported_filesystem", false, None).await;
    scenario.mount("error_unknown", false, None).await;
    // Further results never leave the multipart state.
    scenario.mount("success", false, None).await;

    assert_eq!(
        scenario.router.mount_status("/dev/sdb"),
        MountStatus::MultipartError
    );
    let visible = scenario.host.visible();
    let fail_ids: Vec<_> = visible
        .keys()
        .filter(|id| id.starts_with("deviceFail:"))
        .collect();
    assert_eq!(fail_ids, vec!["deviceFail:/dev/sdb"]);
    assert_eq!(
        visible["deviceFail:/dev/sdb"],
        "Sorry, at least one partition on the device CARD could not be mounted."
    );
}

#[tokio::test]
async fn import_click_opens_the_media_folder_of_the_device() {
    let mut scenario = Scenario::new();

    let click: HostEvent = serde_json::from_str(
        r#"{"event":"notification_button_clicked","notificationId":"deviceImport:/dev/sdb1"}"#,
    )
    .expect("valid click event");
    scenario.router.dispatch(click);
    scenario.router.notifications().flush().await;

    let request = scenario.navigation.try_recv().expect("navigation request");
    assert_eq!(
        serde_json::to_string(&request).unwrap(),
        r#"{"devicePath":"/dev/sdb1","filePath":"DCIM"}"#
    );
}

#[tokio::test]
async fn removal_clears_failure_and_forgets_status() {
    let scenario = Scenario::new();

    scenario.mount("error_unknown", false, None).await;
    assert!(scenario.host.visible().contains_key("deviceFail:/dev/sdb"));

    let removed: HostEvent = serde_json::from_str(
        r#"{"event":"device_changed","type":"removed","devicePath":"/dev/sdb"}"#,
    )
    .expect("valid device event");
    scenario.router.dispatch(removed);
    scenario.router.notifications().flush().await;

    assert!(scenario.host.visible().is_empty());
    assert_eq!(scenario.router.mount_status("/dev/sdb"), MountStatus::NoResult);
    assert_eq!(scenario.host.creates(), vec!["deviceFail:/dev/sdb"]);
}
