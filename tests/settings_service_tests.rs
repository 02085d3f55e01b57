//! Synced settings fetch and update.

mod support;

use peptide::settings::{
    LoadedSettings, MessageReplyStyle, SettingsService, SpecialEmbedSettings, Theme,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use std::time::Duration;

use support::logged_in_harness;

async fn mount_fetch(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/sync/settings/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_set(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/sync/settings/set"))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Settings documents pushed to the server, in arrival order.
async fn pushed_documents(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/sync/settings/set")
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            serde_json::from_str(body["android"].as_str().unwrap()).unwrap()
        })
        .collect()
}

#[tokio::test]
async fn fetch_hydrates_loaded_settings() {
    let server = MockServer::start().await;
    mount_fetch(
        &server,
        json!({
            "android": [1, "{\"theme\":\"Amoled\",\"messageReplyStyle\":\"DoubleTap\",\"avatarRadius\":8}"]
        }),
    )
    .await;

    let h = logged_in_harness(&server, "tok");
    let service = SettingsService::new(h.client.clone());
    let loaded = service.fetch().await.expect("fetch");

    assert_eq!(loaded.theme, Theme::Amoled);
    assert_eq!(loaded.message_reply_style, MessageReplyStyle::DoubleTap);
    assert_eq!(loaded.avatar_radius, 8);
    assert_eq!(service.loaded(), loaded);
}

#[tokio::test]
async fn missing_document_hydrates_defaults() {
    let server = MockServer::start().await;
    mount_fetch(&server, json!({})).await;

    let h = logged_in_harness(&server, "tok");
    let service = SettingsService::new(h.client.clone());
    assert_eq!(service.fetch().await.expect("fetch"), LoadedSettings::default());
}

#[tokio::test]
async fn update_reply_style_keeps_other_synced_fields() {
    let server = MockServer::start().await;
    mount_fetch(
        &server,
        json!({"android": [1, "{\"theme\":\"Light\"}"]}),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/sync/settings/set"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let h = logged_in_harness(&server, "tok");
    let service = SettingsService::new(h.client.clone());
    service.fetch().await.expect("fetch");
    service
        .update_message_reply_style(MessageReplyStyle::None)
        .await
        .expect("update");

    assert_eq!(service.loaded().message_reply_style, MessageReplyStyle::None);
    assert_eq!(service.loaded().theme, Theme::Light);

    assert_eq!(
        pushed_documents(&server).await,
        vec![json!({"theme": "Light", "messageReplyStyle": "None"})]
    );
}

#[tokio::test]
async fn update_embed_settings_pushes_merged_document() {
    let server = MockServer::start().await;
    mount_fetch(
        &server,
        json!({"android": [1, "{\"theme\":\"Light\",\"messageReplyStyle\":\"DoubleTap\"}"]}),
    )
    .await;
    mount_set(&server, ResponseTemplate::new(204)).await;

    let h = logged_in_harness(&server, "tok");
    let service = SettingsService::new(h.client.clone());
    service.fetch().await.expect("fetch");

    let next = SpecialEmbedSettings {
        embed_you_tube: false,
        embed_apple_music: true,
    };
    service
        .update_special_embed_settings(next)
        .await
        .expect("update");

    assert_eq!(
        pushed_documents(&server).await,
        vec![json!({
            "theme": "Light",
            "messageReplyStyle": "DoubleTap",
            "specialEmbedSettings": {"embedYouTube": false, "embedAppleMusic": true}
        })]
    );
    let loaded = service.loaded();
    assert_eq!(loaded.special_embed_settings, next);
    assert_eq!(loaded.theme, Theme::Light);
    assert_eq!(loaded.message_reply_style, MessageReplyStyle::DoubleTap);
    assert_eq!(service.synced().special_embed_settings, Some(next));
    assert_eq!(service.synced().theme.as_deref(), Some("Light"));
}

#[tokio::test]
async fn overlapping_updates_both_survive() {
    let server = MockServer::start().await;
    mount_fetch(&server, json!({})).await;
    mount_set(
        &server,
        ResponseTemplate::new(204).set_delay(Duration::from_millis(200)),
    )
    .await;

    let h = logged_in_harness(&server, "tok");
    let service = SettingsService::new(h.client.clone());
    service.fetch().await.expect("fetch");

    let next = SpecialEmbedSettings {
        embed_you_tube: false,
        embed_apple_music: false,
    };
    let (reply, embeds) = tokio::join!(
        service.update_message_reply_style(MessageReplyStyle::DoubleTap),
        service.update_special_embed_settings(next),
    );
    reply.expect("reply style");
    embeds.expect("embeds");

    let synced = service.synced();
    assert_eq!(synced.message_reply_style.as_deref(), Some("DoubleTap"));
    assert_eq!(synced.special_embed_settings, Some(next));
    let loaded = service.loaded();
    assert_eq!(loaded.message_reply_style, MessageReplyStyle::DoubleTap);
    assert_eq!(loaded.special_embed_settings, next);

    let pushed = pushed_documents(&server).await;
    assert_eq!(pushed.len(), 2);
    assert_eq!(
        pushed[1],
        json!({
            "messageReplyStyle": "DoubleTap",
            "specialEmbedSettings": {"embedYouTube": false, "embedAppleMusic": false}
        })
    );
}

#[tokio::test]
async fn rejected_update_leaves_local_state_untouched() {
    let server = MockServer::start().await;
    mount_fetch(&server, json!({})).await;
    Mock::given(method("POST"))
        .and(path("/sync/settings/set"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let h = logged_in_harness(&server, "tok");
    let service = SettingsService::new(h.client.clone());
    service.fetch().await.expect("fetch");

    let next = SpecialEmbedSettings {
        embed_you_tube: false,
        embed_apple_music: false,
    };
    assert!(service.update_special_embed_settings(next).await.is_err());
    assert_eq!(
        service.loaded().special_embed_settings,
        SpecialEmbedSettings::default()
    );
    assert_eq!(service.synced().special_embed_settings, None);
}

#[tokio::test]
async fn reset_returns_to_defaults() {
    let server = MockServer::start().await;
    mount_fetch(&server, json!({"android": [1, "{\"avatarRadius\":1}"]})).await;

    let h = logged_in_harness(&server, "tok");
    let service = SettingsService::new(h.client.clone());
    service.fetch().await.expect("fetch");
    assert_eq!(service.loaded().avatar_radius, 1);
    service.reset();
    assert_eq!(service.loaded(), LoadedSettings::default());
}
