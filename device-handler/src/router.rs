// SPDX-License-Identifier: GPL-3.0-only

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use device_types::{
    DeviceChangedEvent, DeviceEventKind, HostEvent, MountCompletedEvent, MountEventType,
    MountStatus, NavigationRequest, NotificationId, NotificationKind,
};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::auto_import::AutoImportPipeline;
use crate::config::{HandlerConfig, MessageCatalog};
use crate::mount_status::{MountStatusTracker, NotificationAction};
use crate::notification::NotificationCenter;

/// Entry point for everything the host reports.
///
/// Status transitions happen synchronously while routing; only host
/// notification calls and the auto-import pipeline run in the background.
pub struct DeviceEventRouter {
    tracker: Mutex<MountStatusTracker>,
    imports: Mutex<JoinSet<()>>,
    notifications: Arc<NotificationCenter>,
    pipeline: Arc<AutoImportPipeline>,
    messages: MessageCatalog,
    import_target: String,
    navigation: mpsc::UnboundedSender<NavigationRequest>,
}

impl DeviceEventRouter {
    pub fn new(
        config: &HandlerConfig,
        notifications: Arc<NotificationCenter>,
        pipeline: Arc<AutoImportPipeline>,
        navigation: mpsc::UnboundedSender<NavigationRequest>,
    ) -> Self {
        Self {
            tracker: Mutex::new(MountStatusTracker::new()),
            imports: Mutex::new(JoinSet::new()),
            notifications,
            pipeline,
            messages: config.messages.clone(),
            import_target: config.import_target.clone(),
            navigation,
        }
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn mount_status(&self, device_path: &str) -> MountStatus {
        self.tracker().status(device_path)
    }

    pub fn dispatch(&self, event: HostEvent) {
        match event {
            HostEvent::DeviceChanged(event) => self.handle_device_changed(&event),
            HostEvent::MountCompleted(event) => {
                self.handle_mount_completed(&event);
            }
            HostEvent::NotificationButtonClicked(click) => {
                self.handle_button_clicked(&click.notification_id)
            }
        }
    }

    pub fn handle_device_changed(&self, event: &DeviceChangedEvent) {
        let path = event.device_path.as_str();
        tracing::debug!("Device event {} for {path}", event.kind.as_str());

        match &event.kind {
            DeviceEventKind::Disabled => {
                self.channel_show(NotificationKind::DeviceExternalStorageDisabled, path);
            }
            DeviceEventKind::Removed => {
                self.channel_hide(NotificationKind::DeviceFail, path);
                self.channel_hide(NotificationKind::DeviceExternalStorageDisabled, path);
                if let Some(status) = self.tracker().remove(path) {
                    tracing::debug!("Forgot mount status {status:?} of {path}");
                }
            }
            DeviceEventKind::HardUnplugged => {
                self.channel_show(NotificationKind::DeviceHardUnplugged, path);
            }
            DeviceEventKind::FormatStart => {
                self.channel_show(NotificationKind::FormatStart, path);
            }
            DeviceEventKind::FormatSuccess => {
                self.channel_hide(NotificationKind::FormatStart, path);
                self.channel_show(NotificationKind::FormatSuccess, path);
            }
            DeviceEventKind::FormatFail => {
                self.channel_hide(NotificationKind::FormatStart, path);
                self.channel_show(NotificationKind::FormatFail, path);
            }
            DeviceEventKind::Unknown(kind) => {
                tracing::warn!("Unknown device event type: {kind}");
            }
        }
    }

    /// Route a mount result.
    ///
    /// Returns whether an auto-import decision was started for the volume.
    /// [`Self::drain`] waits for it.
    pub fn handle_mount_completed(&self, event: &MountCompletedEvent) -> bool {
        let volume = &event.volume_metadata;
        let mut import_started = false;

        if event.status.is_success() && event.should_notify {
            match event.event_type {
                MountEventType::Mount => {
                    let pipeline = Arc::clone(&self.pipeline);
                    let notifications = Arc::clone(&self.notifications);
                    let navigation = self.navigation.clone();
                    let metadata = volume.clone();
                    let mut imports = self.imports();
                    while imports.try_join_next().is_some() {}
                    imports.spawn(async move {
                        pipeline.run(metadata, &notifications, &navigation).await;
                    });
                    import_started = true;
                }
                MountEventType::Unmount => {
                    if let Some(path) = volume.device_path.as_deref() {
                        self.channel_hide(NotificationKind::DeviceNavigation, path);
                    }
                }
            }
        }

        let update = self.tracker().apply(event);
        if let Some(update) = update {
            for action in update.actions {
                self.execute(action);
            }
        }

        import_started
    }

    /// Wait for every auto-import decision started so far, including ones
    /// started while waiting.
    pub async fn drain(&self) {
        loop {
            let mut pending = std::mem::take(&mut *self.imports());
            if pending.is_empty() {
                break;
            }
            while let Some(result) = pending.join_next().await {
                if let Err(e) = result {
                    tracing::error!("Auto-import task failed: {e}");
                }
            }
        }
    }

    pub fn handle_button_clicked(&self, notification_id: &str) {
        let Some(id) = NotificationId::parse(notification_id) else {
            tracing::debug!("Ignoring click on foreign notification {notification_id}");
            return;
        };

        let (kind, request) = match id.prefix() {
            NotificationKind::NAVIGATION_PREFIX => (
                NotificationKind::DeviceNavigation,
                NavigationRequest::device(id.device_path()),
            ),
            NotificationKind::FAIL_PREFIX => (
                NotificationKind::DeviceFail,
                NavigationRequest::device(id.device_path()),
            ),
            NotificationKind::IMPORT_PREFIX => (
                NotificationKind::DeviceImport,
                NavigationRequest::device_folder(id.device_path(), self.import_target.as_str()),
            ),
            _ => {
                tracing::debug!("No action for notification {notification_id}");
                return;
            }
        };

        self.channel_hide(kind, id.device_path());
        self.emit(request);
    }

    fn execute(&self, action: NotificationAction) {
        match action {
            NotificationAction::Show {
                kind,
                device_path,
                message,
            } => {
                let message = message.map(|message| self.messages.render(&message));
                self.notifications.channel(kind).show(&device_path, message);
            }
            NotificationAction::Hide { kind, device_path } => {
                self.channel_hide(kind, &device_path);
            }
        }
    }

    fn channel_show(&self, kind: NotificationKind, device_path: &str) {
        self.notifications.channel(kind).show(device_path, None);
    }

    fn channel_hide(&self, kind: NotificationKind, device_path: &str) {
        self.notifications.channel(kind).hide(device_path);
    }

    fn emit(&self, request: NavigationRequest) {
        tracing::info!("Navigation requested: {request:?}");
        if self.navigation.send(request).is_err() {
            tracing::warn!("Navigation receiver is gone, dropping request");
        }
    }

    // Never held across an await.
    fn tracker(&self) -> MutexGuard<'_, MountStatusTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn imports(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.imports.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
