use serde_json::json;

use crate::helpers::{mount_email_ok, spawn_app};

#[tokio::test]
async fn unsubscribe_without_token_is_rejected_with_400() {
    let app = spawn_app().await;

    let resp = reqwest::get(format!("{}/subscribe/unsubscribe", &app.address))
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
}

#[tokio::test]
async fn an_unknown_token_is_rejected_with_404() {
    let app = spawn_app().await;

    let resp = app.get_unsubscribe(&"b".repeat(64)).await;

    assert_eq!(resp.status().as_u16(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid unsubscribe token");
}

#[tokio::test]
async fn the_link_from_the_email_removes_the_subscriber() {
    let app = spawn_app().await;
    mount_email_ok(&app).await;

    app.post_subscribe(&json!({"email": "a@x.com", "gdprConsent": true}))
        .await;

    let received_request = &app.email_server.received_requests().await.unwrap()[0];
    let links = app.get_confirmation_links(received_request);

    let resp = reqwest::get(links.unsubscribe).await.unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "You have been successfully unsubscribed");

    assert_eq!(app.store.count(), 0);
}

#[tokio::test]
async fn an_unconfirmed_subscriber_can_unsubscribe() {
    let app = spawn_app().await;
    mount_email_ok(&app).await;

    app.post_subscribe(&json!({"email": "a@x.com", "gdprConsent": true}))
        .await;
    let saved = app.store.get("a@x.com").unwrap();
    assert!(!saved.confirmed);

    let resp = app.get_unsubscribe(saved.unsubscribe_token.as_ref()).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(app.store.count(), 0);
}

#[tokio::test]
async fn unsubscribing_twice_fails_the_second_time() {
    let app = spawn_app().await;
    mount_email_ok(&app).await;

    app.post_subscribe(&json!({"email": "a@x.com", "gdprConsent": true}))
        .await;
    let token = app
        .store
        .get("a@x.com")
        .unwrap()
        .unsubscribe_token
        .as_ref()
        .to_string();

    let first = app.get_unsubscribe(&token).await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app.get_unsubscribe(&token).await;
    assert_eq!(second.status().as_u16(), 404);
}

#[tokio::test]
async fn a_removed_record_cannot_be_confirmed() {
    let app = spawn_app().await;
    mount_email_ok(&app).await;

    app.post_subscribe(&json!({"email": "a@x.com", "gdprConsent": true}))
        .await;
    let saved = app.store.get("a@x.com").unwrap();

    app.get_unsubscribe(saved.unsubscribe_token.as_ref()).await;

    let resp = app.get_confirm(saved.confirmation_token.as_ref()).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn the_full_lifecycle_subscribe_confirm_unsubscribe() {
    let app = spawn_app().await;
    mount_email_ok(&app).await;

    let subscribe = app
        .post_subscribe(&json!({"email": "a@x.com", "gdprConsent": true}))
        .await;
    assert_eq!(subscribe.status().as_u16(), 200);
    assert!(!app.store.get("a@x.com").unwrap().confirmed);

    let received_request = &app.email_server.received_requests().await.unwrap()[0];
    let links = app.get_confirmation_links(received_request);

    let confirm = reqwest::get(links.confirm).await.unwrap();
    assert_eq!(confirm.status().as_u16(), 200);
    assert!(app.store.get("a@x.com").unwrap().confirmed);

    let unsubscribe = reqwest::get(links.unsubscribe).await.unwrap();
    assert_eq!(unsubscribe.status().as_u16(), 200);
    assert!(app.store.get("a@x.com").is_none());
}
