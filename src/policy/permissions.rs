//! Permissions-Policy feature slots and allow-lists.

use serde::{Deserialize, Serialize};

use crate::policy::slots::{Slot, SlotMap};
use crate::policy::values::AllowListValue;

/// One feature controlled by the Permissions-Policy header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PermissionsFeature {
    Accelerometer,
    AmbientLightSensor,
    Autoplay,
    Battery,
    Camera,
    DisplayCapture,
    DocumentDomain,
    EncryptedMedia,
    ExecutionWhileNotRendered,
    ExecutionWhileOutOfViewport,
    Fullscreen,
    Gamepad,
    Geolocation,
    Gyroscope,
    LayoutAnimations,
    LegacyImageFormats,
    Magnetometer,
    Microphone,
    Midi,
    NavigationOverride,
    OversizedImages,
    Payment,
    PictureInPicture,
    PublicKeyCredentialsGet,
    SpeakerSelection,
    SyncXhr,
    UnoptimizedImages,
    UnsizedMedia,
    Usb,
    ScreenWakeLock,
    WebShare,
    XrSpatialTracking,
}

/// Allow-list of one feature slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AllowListEntry {
    /// Features are opt-in: a slot only appears in the header when enabled.
    pub enabled: bool,
    pub value: AllowListValue,

    /// Extra origins, rendered only for `self` and `src`.
    pub origins: Vec<String>,
}

impl AllowListEntry {
    pub fn new(value: AllowListValue) -> Self {
        Self {
            enabled: false,
            value,
            origins: Vec::new(),
        }
    }

    /// An enabled entry with the given value.
    pub fn enabled(value: AllowListValue) -> Self {
        Self {
            enabled: true,
            ..Self::new(value)
        }
    }

    pub fn with_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins.extend(origins.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllowListPatch {
    enabled: Option<bool>,
    value: Option<AllowListValue>,
    origins: Option<Vec<String>>,
}

impl Slot for PermissionsFeature {
    type Entry = AllowListEntry;
    type Patch = AllowListPatch;

    const ORDER: &'static [Self] = &[
        PermissionsFeature::Accelerometer,
        PermissionsFeature::AmbientLightSensor,
        PermissionsFeature::Autoplay,
        PermissionsFeature::Battery,
        PermissionsFeature::Camera,
        PermissionsFeature::DisplayCapture,
        PermissionsFeature::DocumentDomain,
        PermissionsFeature::EncryptedMedia,
        PermissionsFeature::ExecutionWhileNotRendered,
        PermissionsFeature::ExecutionWhileOutOfViewport,
        PermissionsFeature::Fullscreen,
        PermissionsFeature::Gamepad,
        PermissionsFeature::Geolocation,
        PermissionsFeature::Gyroscope,
        PermissionsFeature::LayoutAnimations,
        PermissionsFeature::LegacyImageFormats,
        PermissionsFeature::Magnetometer,
        PermissionsFeature::Microphone,
        PermissionsFeature::Midi,
        PermissionsFeature::NavigationOverride,
        PermissionsFeature::OversizedImages,
        PermissionsFeature::Payment,
        PermissionsFeature::PictureInPicture,
        PermissionsFeature::PublicKeyCredentialsGet,
        PermissionsFeature::SpeakerSelection,
        PermissionsFeature::SyncXhr,
        PermissionsFeature::UnoptimizedImages,
        PermissionsFeature::UnsizedMedia,
        PermissionsFeature::Usb,
        PermissionsFeature::ScreenWakeLock,
        PermissionsFeature::WebShare,
        PermissionsFeature::XrSpatialTracking,
    ];

    fn token(self) -> &'static str {
        match self {
            PermissionsFeature::Accelerometer => "accelerometer",
            PermissionsFeature::AmbientLightSensor => "ambient-light-sensor",
            PermissionsFeature::Autoplay => "autoplay",
            PermissionsFeature::Battery => "battery",
            PermissionsFeature::Camera => "camera",
            PermissionsFeature::DisplayCapture => "display-capture",
            PermissionsFeature::DocumentDomain => "document-domain",
            PermissionsFeature::EncryptedMedia => "encrypted-media",
            PermissionsFeature::ExecutionWhileNotRendered => "execution-while-not-rendered",
            PermissionsFeature::ExecutionWhileOutOfViewport => "execution-while-out-of-viewport",
            PermissionsFeature::Fullscreen => "fullscreen",
            PermissionsFeature::Gamepad => "gamepad",
            PermissionsFeature::Geolocation => "geolocation",
            PermissionsFeature::Gyroscope => "gyroscope",
            PermissionsFeature::LayoutAnimations => "layout-animations",
            PermissionsFeature::LegacyImageFormats => "legacy-image-formats",
            PermissionsFeature::Magnetometer => "magnetometer",
            PermissionsFeature::Microphone => "microphone",
            PermissionsFeature::Midi => "midi",
            PermissionsFeature::NavigationOverride => "navigation-override",
            PermissionsFeature::OversizedImages => "oversized-images",
            PermissionsFeature::Payment => "payment",
            PermissionsFeature::PictureInPicture => "picture-in-picture",
            PermissionsFeature::PublicKeyCredentialsGet => "publickey-credentials-get",
            PermissionsFeature::SpeakerSelection => "speaker-selection",
            PermissionsFeature::SyncXhr => "sync-xhr",
            PermissionsFeature::UnoptimizedImages => "unoptimized-images",
            PermissionsFeature::UnsizedMedia => "unsized-media",
            PermissionsFeature::Usb => "usb",
            PermissionsFeature::ScreenWakeLock => "screen-wake-lock",
            PermissionsFeature::WebShare => "web-share",
            PermissionsFeature::XrSpatialTracking => "xr-spatial-tracking",
        }
    }

    fn default_entry(self) -> AllowListEntry {
        let value = match self {
            PermissionsFeature::DocumentDomain
            | PermissionsFeature::OversizedImages
            | PermissionsFeature::PictureInPicture
            | PermissionsFeature::SyncXhr
            | PermissionsFeature::UnsizedMedia => AllowListValue::All,
            _ => AllowListValue::SelfOrigin,
        };
        AllowListEntry::new(value)
    }

    fn apply(entry: &mut AllowListEntry, patch: AllowListPatch) {
        if let Some(enabled) = patch.enabled {
            entry.enabled = enabled;
        }
        if let Some(value) = patch.value {
            entry.value = value;
        }
        if let Some(origins) = patch.origins {
            entry.origins = origins;
        }
    }
}

/// `Permissions-Policy` configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PermissionsPolicyConfig {
    pub enabled: bool,
    pub features: SlotMap<PermissionsFeature>,
}

impl PermissionsPolicyConfig {
    pub fn feature(&self, feature: PermissionsFeature) -> Option<&AllowListEntry> {
        self.features.get(feature)
    }

    pub fn feature_mut(&mut self, feature: PermissionsFeature) -> &mut AllowListEntry {
        self.features.get_mut(feature)
    }
}

impl Default for PermissionsPolicyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            features: SlotMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_complete_and_unique() {
        let order = PermissionsFeature::ORDER;
        assert_eq!(order.len(), 32);
        for (i, a) in order.iter().enumerate() {
            for b in &order[i + 1..] {
                assert_ne!(a, b);
                assert_ne!(a.token(), b.token());
            }
        }
        assert_eq!(order[0].token(), "accelerometer");
        assert_eq!(order[4].token(), "camera");
        assert_eq!(order[21].token(), "payment");
        assert_eq!(order[31].token(), "xr-spatial-tracking");
    }

    #[test]
    fn test_slot_defaults() {
        let config = PermissionsPolicyConfig::default();
        assert!(config.enabled);

        let all = [
            PermissionsFeature::DocumentDomain,
            PermissionsFeature::OversizedImages,
            PermissionsFeature::PictureInPicture,
            PermissionsFeature::SyncXhr,
            PermissionsFeature::UnsizedMedia,
        ];
        for (feature, entry) in config.features.iter() {
            assert!(!entry.enabled, "{:?} should be opt-in", feature);
            assert!(entry.origins.is_empty());
            let expected = if all.contains(&feature) {
                AllowListValue::All
            } else {
                AllowListValue::SelfOrigin
            };
            assert_eq!(entry.value, expected, "{:?}", feature);
        }
    }

    #[test]
    fn test_from_token() {
        assert_eq!(
            PermissionsFeature::from_token("publickey-credentials-get"),
            Some(PermissionsFeature::PublicKeyCredentialsGet)
        );
        assert_eq!(PermissionsFeature::from_token("Camera"), None);
    }

    #[test]
    fn test_partial_toml_keeps_slot_defaults() {
        let config: PermissionsPolicyConfig = toml::from_str(
            r#"
            [features.camera]
            enabled = true
            value = "none"

            [features.geolocation]
            enabled = true
            origins = ["https://maps.example.com"]
            "#,
        )
        .unwrap();

        let camera = config.feature(PermissionsFeature::Camera).unwrap();
        assert!(camera.enabled);
        assert_eq!(camera.value, AllowListValue::None);

        let geo = config.feature(PermissionsFeature::Geolocation).unwrap();
        assert_eq!(geo.value, AllowListValue::SelfOrigin);
        assert_eq!(geo.origins, vec!["https://maps.example.com".to_string()]);

        let sync_xhr = config.feature(PermissionsFeature::SyncXhr).unwrap();
        assert!(!sync_xhr.enabled);
        assert_eq!(sync_xhr.value, AllowListValue::All);
    }

    #[test]
    fn test_unknown_feature_rejected() {
        let result: Result<PermissionsPolicyConfig, _> = toml::from_str(
            r#"
            [features.teleport]
            enabled = true
            "#,
        );
        assert!(result.is_err());
    }
}
