// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use device_types::NotificationKind;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mount_status::FailureMessage;

const LABEL_PLACEHOLDER: &str = "{label}";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Answers for the import policy collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ImportSettings {
    pub enabled: bool,

    /// Volumes mounted below one of these roots are import eligible
    pub eligible_roots: Vec<PathBuf>,

    pub companion_app_handles_import: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            eligible_roots: vec![PathBuf::from("/media"), PathBuf::from("/run/media")],
            companion_app_handles_import: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct NotificationTemplate {
    pub title: String,
    pub message: String,
    pub button_label: Option<String>,
}

impl NotificationTemplate {
    fn new(title: &str, message: &str, button_label: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            button_label: button_label.map(str::to_string),
        }
    }
}

/// Configured changes to one template. Omitted fields keep the kind's
/// default; an empty `button_label` removes the button.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemplateOverride {
    title: Option<String>,
    message: Option<String>,
    button_label: Option<String>,
}

impl TemplateOverride {
    fn apply(self, template: &mut NotificationTemplate) {
        if let Some(title) = self.title {
            template.title = title;
        }
        if let Some(message) = self.message {
            template.message = message;
        }
        if let Some(label) = self.button_label {
            template.button_label = Some(label).filter(|label| !label.is_empty());
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MessageOverrides {
    device_navigation: TemplateOverride,
    device_import: TemplateOverride,
    device_fail: TemplateOverride,
    device_fail_unknown: TemplateOverride,
    device_external_storage_disabled: TemplateOverride,
    device_hard_unplugged: TemplateOverride,
    format_start: TemplateOverride,
    format_success: TemplateOverride,
    format_fail: TemplateOverride,

    device_unsupported: Option<String>,
    device_unknown: Option<String>,
    multipart_device_unsupported: Option<String>,
    multipart_device_unsupported_default: Option<String>,
}

impl From<MessageOverrides> for MessageCatalog {
    fn from(overrides: MessageOverrides) -> Self {
        let mut catalog = Self::default();

        overrides.device_navigation.apply(&mut catalog.device_navigation);
        overrides.device_import.apply(&mut catalog.device_import);
        overrides.device_fail.apply(&mut catalog.device_fail);
        overrides
            .device_fail_unknown
            .apply(&mut catalog.device_fail_unknown);
        overrides
            .device_external_storage_disabled
            .apply(&mut catalog.device_external_storage_disabled);
        overrides
            .device_hard_unplugged
            .apply(&mut catalog.device_hard_unplugged);
        overrides.format_start.apply(&mut catalog.format_start);
        overrides.format_success.apply(&mut catalog.format_success);
        overrides.format_fail.apply(&mut catalog.format_fail);

        let strings = [
            (overrides.device_unsupported, &mut catalog.device_unsupported),
            (overrides.device_unknown, &mut catalog.device_unknown),
            (
                overrides.multipart_device_unsupported,
                &mut catalog.multipart_device_unsupported,
            ),
            (
                overrides.multipart_device_unsupported_default,
                &mut catalog.multipart_device_unsupported_default,
            ),
        ];
        for (value, target) in strings {
            if let Some(value) = value {
                *target = value;
            }
        }

        catalog
    }
}

/// User-visible strings. `{label}` is replaced by the device label.
///
/// Configuration only lists what differs from the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(from = "MessageOverrides")]
pub struct MessageCatalog {
    pub device_navigation: NotificationTemplate,
    pub device_import: NotificationTemplate,
    pub device_fail: NotificationTemplate,
    pub device_fail_unknown: NotificationTemplate,
    pub device_external_storage_disabled: NotificationTemplate,
    pub device_hard_unplugged: NotificationTemplate,
    pub format_start: NotificationTemplate,
    pub format_success: NotificationTemplate,
    pub format_fail: NotificationTemplate,

    pub device_unsupported: String,
    pub device_unknown: String,
    pub multipart_device_unsupported: String,
    pub multipart_device_unsupported_default: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let detected = "Removable device detected";

        Self {
            device_navigation: NotificationTemplate::new(
                detected,
                "Explore the device's content in the file manager.",
                Some("Open"),
            ),
            device_import: NotificationTemplate::new(
                detected,
                "Photos and videos were found on the device.",
                Some("Open media folder"),
            ),
            device_fail: NotificationTemplate::new(
                detected,
                "Sorry, your device is not supported.",
                None,
            ),
            device_fail_unknown: NotificationTemplate::new(
                detected,
                "Sorry, your device could not be recognized.",
                Some("Format this device"),
            ),
            device_external_storage_disabled: NotificationTemplate::new(
                detected,
                "Your administrator has disabled external storage.",
                None,
            ),
            device_hard_unplugged: NotificationTemplate::new(
                "Device removed without ejecting",
                "Eject the device before removing it, or you may lose data.",
                None,
            ),
            format_start: NotificationTemplate::new(
                "Formatting device",
                "The device is being formatted. Do not remove it.",
                None,
            ),
            format_success: NotificationTemplate::new(
                "Formatting complete",
                "The device was formatted.",
                None,
            ),
            format_fail: NotificationTemplate::new(
                "Formatting failed",
                "The device could not be formatted.",
                None,
            ),
            device_unsupported: "Sorry, the device {label} is not supported.".to_string(),
            device_unknown: "Sorry, the device {label} could not be recognized.".to_string(),
            multipart_device_unsupported:
                "Sorry, at least one partition on the device {label} could not be mounted."
                    .to_string(),
            multipart_device_unsupported_default:
                "Sorry, at least one partition on your device could not be mounted.".to_string(),
        }
    }
}

impl MessageCatalog {
    pub fn template(&self, kind: NotificationKind) -> &NotificationTemplate {
        match kind {
            NotificationKind::DeviceNavigation => &self.device_navigation,
            NotificationKind::DeviceImport => &self.device_import,
            NotificationKind::DeviceFail => &self.device_fail,
            NotificationKind::DeviceFailUnknown => &self.device_fail_unknown,
            NotificationKind::DeviceExternalStorageDisabled => {
                &self.device_external_storage_disabled
            }
            NotificationKind::DeviceHardUnplugged => &self.device_hard_unplugged,
            NotificationKind::FormatStart => &self.format_start,
            NotificationKind::FormatSuccess => &self.format_success,
            NotificationKind::FormatFail => &self.format_fail,
        }
    }

    /// Text of a mount failure message, falling back to the label-less
    /// variant when the device has no label.
    pub fn render(&self, message: &FailureMessage) -> String {
        let (labelled, default) = match message {
            FailureMessage::Unsupported { .. } => {
                (&self.device_unsupported, &self.device_fail.message)
            }
            FailureMessage::Unknown { .. } => {
                (&self.device_unknown, &self.device_fail_unknown.message)
            }
            FailureMessage::Multipart { .. } => (
                &self.multipart_device_unsupported,
                &self.multipart_device_unsupported_default,
            ),
        };

        match message.label() {
            Some(label) => labelled.replace(LABEL_PLACEHOLDER, label),
            None => default.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct HandlerConfig {
    pub log_level: LoggingLevel,

    /// Application name reported to the notification service
    pub app_name: String,

    /// Icon name or path shown on every notification
    pub icon: String,

    /// Media folder names probed on new volumes, in priority order
    pub media_folders: Vec<String>,

    /// Folder opened when the import notification button is clicked
    pub import_target: String,

    pub import: ImportSettings,
    pub messages: MessageCatalog,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            log_level: LoggingLevel::Info,
            app_name: "Removable Devices".to_string(),
            icon: "drive-removable-media".to_string(),
            media_folders: vec!["DCIM".to_string(), "dcim".to_string()],
            import_target: "DCIM".to_string(),
            import: ImportSettings::default(),
            messages: MessageCatalog::default(),
        }
    }
}

impl HandlerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
