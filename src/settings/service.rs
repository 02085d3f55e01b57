use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::Mutex as AsyncMutex;

use crate::api::RevoltClient;
use crate::error::PeptideError;

use super::{AndroidSettings, LoadedSettings, MessageReplyStyle, SpecialEmbedSettings};

/// Key of the synced settings document owned by this client.
pub const ANDROID_SETTINGS_KEY: &str = "android";

#[derive(Debug, Default)]
struct SettingsState {
    synced: AndroidSettings,
    loaded: LoadedSettings,
}

/// Keeps the synced settings document and its resolved form together.
///
/// Updates are pushed to the server first; local state only changes once
/// the server accepted the new document. Fetches and updates run one at a
/// time, so each pushed document is built on the last committed one.
pub struct SettingsService {
    client: RevoltClient,
    state: Mutex<SettingsState>,
    sync: AsyncMutex<()>,
}

impl SettingsService {
    pub fn new(client: RevoltClient) -> Self {
        Self {
            client,
            state: Mutex::new(SettingsState::default()),
            sync: AsyncMutex::new(()),
        }
    }

    pub fn loaded(&self) -> LoadedSettings {
        self.lock().loaded.clone()
    }

    pub fn synced(&self) -> AndroidSettings {
        self.lock().synced.clone()
    }

    /// Pull the synced document and hydrate the loaded settings from it.
    /// A missing document hydrates to defaults.
    pub async fn fetch(&self) -> Result<LoadedSettings, PeptideError> {
        let _sync = self.sync.lock().await;
        let mut entries = self
            .client
            .fetch_synced_settings(&[ANDROID_SETTINGS_KEY])
            .await?;
        let synced = match entries.remove(ANDROID_SETTINGS_KEY) {
            Some((timestamp, raw)) => {
                tracing::debug!(timestamp, "Fetched synced settings");
                serde_json::from_str(&raw)?
            }
            None => AndroidSettings::default(),
        };

        let mut state = self.lock();
        state.loaded.hydrate(&synced);
        state.synced = synced;
        Ok(state.loaded.clone())
    }

    pub async fn update_message_reply_style(
        &self,
        next: MessageReplyStyle,
    ) -> Result<(), PeptideError> {
        let _sync = self.sync.lock().await;
        let mut document = self.synced();
        document.message_reply_style = Some(next.to_string());
        self.push(document).await?;
        self.lock().loaded.message_reply_style = next;
        Ok(())
    }

    pub async fn update_special_embed_settings(
        &self,
        next: SpecialEmbedSettings,
    ) -> Result<(), PeptideError> {
        let _sync = self.sync.lock().await;
        let mut document = self.synced();
        document.special_embed_settings = Some(next);
        self.push(document).await?;
        self.lock().loaded.special_embed_settings = next;
        Ok(())
    }

    /// Forget everything, e.g. after logout.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.synced = AndroidSettings::default();
        state.loaded.reset();
    }

    async fn push(&self, document: AndroidSettings) -> Result<(), PeptideError> {
        let raw = serde_json::to_string(&document)?;
        self.client
            .set_synced_setting(ANDROID_SETTINGS_KEY, &raw, Utc::now().timestamp_millis())
            .await?;
        self.lock().synced = document;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, SettingsState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
