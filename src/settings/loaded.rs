use std::str::FromStr;

use super::{AndroidSettings, MessageReplyStyle, SpecialEmbedSettings, Theme};

pub const DEFAULT_AVATAR_RADIUS: u32 = 50;

/// Settings resolved against their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub theme: Theme,
    pub message_reply_style: MessageReplyStyle,
    pub avatar_radius: u32,
    pub experiments_enabled: bool,
    pub special_embed_settings: SpecialEmbedSettings,
}

impl Default for LoadedSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            message_reply_style: MessageReplyStyle::default(),
            avatar_radius: DEFAULT_AVATAR_RADIUS,
            experiments_enabled: false,
            special_embed_settings: SpecialEmbedSettings::default(),
        }
    }
}

impl LoadedSettings {
    /// Apply a synced document. Absent or unrecognised values fall back to
    /// their defaults; `experiments_enabled` is local-only and untouched.
    pub fn hydrate(&mut self, settings: &AndroidSettings) {
        self.theme = parse_or_default(settings.theme.as_deref(), "theme");
        self.message_reply_style = parse_or_default(
            settings.message_reply_style.as_deref(),
            "messageReplyStyle",
        );
        self.avatar_radius = settings.avatar_radius.unwrap_or(DEFAULT_AVATAR_RADIUS);
        self.special_embed_settings = settings.special_embed_settings.unwrap_or_default();
    }

    /// Back to defaults, e.g. after logout.
    pub fn reset(&mut self) {
        let experiments_enabled = self.experiments_enabled;
        *self = Self {
            experiments_enabled,
            ..Self::default()
        };
    }
}

fn parse_or_default<T: FromStr + Default>(value: Option<&str>, field: &str) -> T {
    match value {
        None => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(field, value = raw, "Unknown setting value; using default");
            T::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hydrate_resolves_known_values() {
        let mut loaded = LoadedSettings::default();
        loaded.hydrate(&AndroidSettings {
            theme: Some("Amoled".to_string()),
            message_reply_style: Some("DoubleTap".to_string()),
            avatar_radius: Some(12),
            special_embed_settings: Some(SpecialEmbedSettings {
                embed_you_tube: false,
                embed_apple_music: true,
            }),
        });
        assert_eq!(loaded.theme, Theme::Amoled);
        assert_eq!(loaded.message_reply_style, MessageReplyStyle::DoubleTap);
        assert_eq!(loaded.avatar_radius, 12);
        assert!(!loaded.special_embed_settings.embed_you_tube);
    }

    #[test]
    fn hydrate_falls_back_for_unknown_and_missing_values() {
        let mut loaded = LoadedSettings {
            theme: Theme::Light,
            avatar_radius: 3,
            ..LoadedSettings::default()
        };
        loaded.hydrate(&AndroidSettings {
            theme: Some("Sepia".to_string()),
            ..AndroidSettings::default()
        });
        assert_eq!(loaded, LoadedSettings::default());
    }

    #[test]
    fn reset_keeps_local_experiments_flag() {
        let mut loaded = LoadedSettings {
            theme: Theme::Light,
            experiments_enabled: true,
            ..LoadedSettings::default()
        };
        loaded.reset();
        assert_eq!(loaded.theme, Theme::Revolt);
        assert!(loaded.experiments_enabled);
    }
}
