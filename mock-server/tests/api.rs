use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, DEFAULT_API_KEY};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(uri: &str, body: Value, key: Option<&str>) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(key) = key {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {key}"));
    }
    builder.body(body.to_string()).unwrap()
}

fn authed(uri: &str, body: Value) -> Request<String> {
    json_request(uri, body, Some(DEFAULT_API_KEY))
}

// --- validate ---

#[tokio::test]
async fn validate_accepts_configured_key() {
    let resp = app()
        .oneshot(json_request("/api/v1/util/validate", json!({ "key": DEFAULT_API_KEY }), None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!(true));
}

#[tokio::test]
async fn validate_answers_empty_for_wrong_key() {
    let resp = app()
        .oneshot(json_request("/api/v1/util/validate", json!({ "key": "nope" }), None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

// --- auth ---

#[tokio::test]
async fn missing_bearer_is_unauthorized() {
    let resp = app()
        .oneshot(json_request("/api/v1/item/embed", json!({ "id": 501 }), None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_bearer_is_unauthorized() {
    let resp = app()
        .oneshot(json_request("/api/v1/item/embed", json!({ "id": 501 }), Some("other")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_endpoint_returns_404() {
    let resp = app()
        .oneshot(authed("/api/v1/item/teleport", json!({})))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/item/embed")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, format!("Bearer {DEFAULT_API_KEY}"))
        .body("{not json".to_string())
        .unwrap();
    let resp = app().oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- item ---

#[tokio::test]
async fn item_embed_for_known_item() {
    let resp = app()
        .oneshot(authed("/api/v1/item/embed", json!({ "id": 501 })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let embed = body_json(resp).await;
    assert_eq!(embed["title"], "Red Potion");
}

#[tokio::test]
async fn item_embed_for_unknown_item_is_empty() {
    let resp = app()
        .oneshot(authed("/api/v1/item/embed", json!({ "id": 4242 })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn unversioned_path_is_served() {
    let resp = app()
        .oneshot(authed("/api/item/embed", json!({ "id": 502 })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["title"], "Orange Potion");
}

// --- bossfight ---

#[tokio::test]
async fn boss_spawn_has_drops_with_embeds() {
    let resp = app()
        .oneshot(authed("/api/v1/bossfight/boss", json!({ "dropRate": 1 })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let boss = body_json(resp).await;
    assert_eq!(boss["name"], "Baphomet");
    let drops = boss["drops"].as_array().unwrap();
    assert_eq!(drops.len(), 2);
    assert!(drops.iter().all(|drop| drop["embed"].is_object()));
}

// --- auction ---

#[tokio::test]
async fn auctions_get_distinct_ids() {
    use tower::Service;

    let mut app = app().into_service();
    let mut ids = Vec::new();
    for _ in 0..2 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(authed("/api/v1/auction/create", json!({ "item": { "name": "Clip" } })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let auction = body_json(resp).await;
        assert_eq!(auction["item"]["name"], "Clip");
        ids.push(auction["id"].as_str().unwrap().to_string());
    }
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn auction_embed_renders_created_auction() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed("/api/v1/auction/create", json!({ "item": { "name": "Clip" } })))
        .await
        .unwrap();
    let auction = body_json(resp).await;

    let resp = app
        .oneshot(authed(
            "/api/v1/auction/embed",
            json!({ "auction": { "id": auction["id"] }, "type": "history" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let embed = body_json(resp).await;
    assert_eq!(embed["title"], "Auction won");
    assert_eq!(embed["description"], "Clip");
}

#[tokio::test]
async fn auction_embed_for_unknown_id_is_empty() {
    let unknown = json!({ "auction": { "id": "6f1c2e4a-0000-4000-8000-000000000000", "item": { "name": "Clip" } } });
    let resp = app().oneshot(authed("/api/v1/auction/embed", unknown)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());

    let no_id = json!({ "auction": { "item": { "name": "Clip" } } });
    let resp = app().oneshot(authed("/api/v1/auction/embed", no_id)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}
