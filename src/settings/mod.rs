//! Synced client settings and their resolved, in-memory form.

pub mod loaded;
pub mod service;

pub use loaded::LoadedSettings;
pub use service::{SettingsService, ANDROID_SETTINGS_KEY};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
pub enum Theme {
    #[default]
    Revolt,
    Light,
    M3Dynamic,
    Amoled,
    None,
}

/// Gesture used to start a reply to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
pub enum MessageReplyStyle {
    None,
    #[default]
    SwipeFromEnd,
    DoubleTap,
}

/// Which link types are rendered as rich embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialEmbedSettings {
    #[serde(default = "enabled")]
    pub embed_you_tube: bool,
    #[serde(default = "enabled")]
    pub embed_apple_music: bool,
}

impl Default for SpecialEmbedSettings {
    fn default() -> Self {
        Self {
            embed_you_tube: true,
            embed_apple_music: true,
        }
    }
}

fn enabled() -> bool {
    true
}

/// The synced `android` settings document. Enum-valued fields are kept as
/// raw names so documents written by newer clients still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AndroidSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reply_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_embed_settings: Option<SpecialEmbedSettings>,
}
