//! Presence, invite and sync routes.

mod support;

use peptide::api::{ApiError, InviteJoinResponse};
use peptide::types::{InviteCode, Presence};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{harness, logged_in_harness};

#[tokio::test]
async fn set_presence_patches_own_user_with_session_header() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/@me"))
        .and(header("x-session-token", "tok"))
        .and(body_json(json!({"status": {"presence": "Busy"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "01USER"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = logged_in_harness(&server, "tok");
    h.client.set_presence(Presence::Busy).await.expect("presence");
}

#[tokio::test]
async fn authenticated_routes_fail_fast_without_session() {
    let server = MockServer::start().await;
    let h = harness(&server);
    let err = h.client.set_presence(Presence::Online).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingSession));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn join_invite_parses_server_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invites/Testers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "Server",
            "channels": [],
            "server": {"_id": "01SERVER", "name": "Revolt Testers", "owner": "01OWNER"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = logged_in_harness(&server, "tok");
    let code = InviteCode::parse("https://rvlt.gg/Testers").unwrap();
    match h.client.join_invite(&code).await.expect("join") {
        InviteJoinResponse::Server { server } => {
            assert_eq!(server.id, "01SERVER");
            assert_eq!(server.name, "Revolt Testers");
        }
        other => panic!("expected Server, got {other:?}"),
    }
}

#[tokio::test]
async fn join_invite_tolerates_unknown_kinds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invites/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "Future"})))
        .mount(&server)
        .await;

    let h = logged_in_harness(&server, "tok");
    let code = InviteCode::parse("abc").unwrap();
    let joined = h.client.join_invite(&code).await.expect("join");
    assert!(matches!(joined, InviteJoinResponse::Unknown));
}

#[tokio::test]
async fn join_invite_surfaces_typed_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invites/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"type": "NotFound"})))
        .mount(&server)
        .await;

    let h = logged_in_harness(&server, "tok");
    let code = InviteCode::parse("gone").unwrap();
    let err = h.client.join_invite(&code).await.unwrap_err();
    assert_eq!(err.error_type(), Some("NotFound"));
}

#[tokio::test]
async fn sync_fetch_and_set_use_expected_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sync/settings/fetch"))
        .and(body_json(json!({"keys": ["android"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "android": [1700000000000i64, "{\"avatarRadius\":10}"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sync/settings/set"))
        .and(query_param("timestamp", "1700000000001"))
        .and(body_json(json!({"android": "{}"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let h = logged_in_harness(&server, "tok");
    let fetched = h
        .client
        .fetch_synced_settings(&["android"])
        .await
        .expect("fetch");
    assert_eq!(
        fetched.get("android"),
        Some(&(1_700_000_000_000, "{\"avatarRadius\":10}".to_string()))
    );

    h.client
        .set_synced_setting("android", "{}", 1_700_000_000_001)
        .await
        .expect("set");
}
