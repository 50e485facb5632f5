#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, clippy::must_use_candidate, missing_debug_implementations, clippy::clone_on_ref_ptr, unreachable_pub, clippy::similar_names)]
mod common;

use common::TestApp;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

fn parse_timestamp(value: &Value) -> OffsetDateTime {
    OffsetDateTime::parse(value.as_str().expect("timestamp is not a string"), &Rfc3339)
        .expect("timestamp is not RFC 3339")
}

#[tokio::test]
async fn test_create_message_returns_full_detail() {
    let app = TestApp::spawn().await;
    let run_id = Uuid::new_v4().to_string()[..8].to_string();

    let alice = app.register_user(&format!("alice_{run_id}")).await;
    let bob = app.register_user(&format!("bob_{run_id}")).await;

    let resp = app.send_message(&alice.token, &bob.username, "hi").await;
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    let message = &body["message"];

    assert!(Uuid::parse_str(message["id"].as_str().unwrap()).is_ok());
    assert_eq!(message["body"], "hi");
    assert_eq!(message["read_at"], Value::Null);
    assert_eq!(message["from_user"]["username"], alice.username.as_str());
    assert_eq!(message["from_user"]["first_name"], "Test");
    assert_eq!(message["from_user"]["phone"], "+15550000000");
    assert_eq!(message["to_user"]["username"], bob.username.as_str());
    parse_timestamp(&message["sent_at"]);
}

#[tokio::test]
async fn test_message_ids_are_unique() {
    let app = TestApp::spawn().await;
    let run_id = Uuid::new_v4().to_string()[..8].to_string();

    let alice = app.register_user(&format!("alice_{run_id}")).await;
    let bob = app.register_user(&format!("bob_{run_id}")).await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let resp = app.send_message(&alice.token, &bob.username, &format!("message {i}")).await;
        let body: Value = resp.json().await.unwrap();
        ids.push(body["message"]["id"].as_str().unwrap().to_string());
    }

    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[tokio::test]
async fn test_full_access_control_scenario() {
    let app = TestApp::spawn().await;
    let run_id = Uuid::new_v4().to_string()[..8].to_string();

    let alice = app.register_user(&format!("alice_{run_id}")).await;
    let bob = app.register_user(&format!("bob_{run_id}")).await;
    let carol = app.register_user(&format!("carol_{run_id}")).await;

    let resp = app.send_message(&alice.token, &bob.username, "hello bob").await;
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let id = body["message"]["id"].as_str().unwrap().to_string();
    let sent_at = parse_timestamp(&body["message"]["sent_at"]);

    // A third party may not view detail.
    let resp = app.get_message(&carol.token, &id).await;
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert!(body.get("message").is_none(), "denial must not leak message detail");

    // The recipient sees it unread.
    let resp = app.get_message(&bob.token, &id).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"]["read_at"], Value::Null);

    // The sender may view but not mark read.
    let resp = app.get_message(&alice.token, &id).await;
    assert_eq!(resp.status(), 200);
    let resp = app.mark_read(&alice.token, &id).await;
    assert_eq!(resp.status(), 403);

    // Denied mark-read left the message unread.
    let resp = app.get_message(&bob.token, &id).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"]["read_at"], Value::Null);

    // The recipient marks it read.
    let resp = app.mark_read(&bob.token, &id).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let read_at = parse_timestamp(&body["message"]["read_at"]);
    assert!(read_at >= sent_at);

    // Detail reflects the set value on subsequent reads.
    let resp = app.get_message(&bob.token, &id).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(parse_timestamp(&body["message"]["read_at"]), read_at);
}

#[tokio::test]
async fn test_repeat_mark_read_is_idempotent() {
    let app = TestApp::spawn().await;
    let run_id = Uuid::new_v4().to_string()[..8].to_string();

    let alice = app.register_user(&format!("alice_{run_id}")).await;
    let bob = app.register_user(&format!("bob_{run_id}")).await;

    let resp = app.send_message(&alice.token, &bob.username, "read me twice").await;
    let body: Value = resp.json().await.unwrap();
    let id = body["message"]["id"].as_str().unwrap().to_string();

    let resp = app.mark_read(&bob.token, &id).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let first_read_at = parse_timestamp(&body["message"]["read_at"]);

    let resp = app.mark_read(&bob.token, &id).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(parse_timestamp(&body["message"]["read_at"]), first_read_at);
}

#[tokio::test]
async fn test_self_messaging_is_permitted() {
    let app = TestApp::spawn().await;
    let run_id = Uuid::new_v4().to_string()[..8].to_string();

    let alice = app.register_user(&format!("alice_{run_id}")).await;

    let resp = app.send_message(&alice.token, &alice.username, "note to self").await;
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let id = body["message"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["message"]["from_user"]["username"], alice.username.as_str());
    assert_eq!(body["message"]["to_user"]["username"], alice.username.as_str());

    // The sender is also the recipient, so mark-read is permitted.
    let resp = app.mark_read(&alice.token, &id).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"]["read_at"].is_string());
}

#[tokio::test]
async fn test_sender_cannot_be_spoofed() {
    let app = TestApp::spawn().await;
    let run_id = Uuid::new_v4().to_string()[..8].to_string();

    let alice = app.register_user(&format!("alice_{run_id}")).await;
    let bob = app.register_user(&format!("bob_{run_id}")).await;
    let mallory = app.register_user(&format!("mallory_{run_id}")).await;

    // A from_username field in the payload is ignored; the token decides.
    let resp = app
        .client
        .post(format!("{}/v1/messages", app.server_url))
        .bearer_auth(&mallory.token)
        .json(&serde_json::json!({
            "from_username": alice.username,
            "to_username": bob.username,
            "body": "pretending to be alice"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"]["from_user"]["username"], mallory.username.as_str());
}
