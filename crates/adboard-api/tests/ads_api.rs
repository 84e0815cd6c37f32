mod common;

use axum::http::StatusCode;
use common::setup_app;
use serde_json::json;

#[tokio::test]
async fn create_ad_returns_wire_projection() {
    let app = setup_app();
    let owner = app.create_user("alice").await;

    let (status, body) = app
        .post(
            "/ad/",
            json!({ "title": "t", "description": "d", "owner_id": owner }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["owner_id"], owner);
    assert_eq!(body["name"], "t");
    assert_eq!(body["description"], "d");
    assert!(body["registration_time"].as_str().is_some());
    assert!(body.get("title").is_none());
}

#[tokio::test]
async fn create_ad_without_description_stores_null() {
    let app = setup_app();
    let owner = app.create_user("alice").await;

    let (status, body) = app
        .post("/ad/", json!({ "title": "bike", "owner_id": owner.to_string() }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], serde_json::Value::Null);
    assert_eq!(body["owner_id"], owner);
}

#[tokio::test]
async fn create_ad_validates_payload() {
    let app = setup_app();
    let owner = app.create_user("alice").await;

    let (status, body) = app.post("/ad/", json!({ "owner_id": owner })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["field"], "title");
    assert_eq!(body["error"]["kind"], "missing");

    let (status, body) = app
        .post("/ad/", json!({ "title": "bike", "owner_id": "abc" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["field"], "owner_id");
    assert_eq!(body["error"]["kind"], "invalid_type");

    let (status, body) = app
        .post("/ad/", json!({ "title": "x".repeat(65), "owner_id": owner }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["kind"], "too_long");
}

#[tokio::test]
async fn create_ad_with_unknown_owner_gets_400() {
    let app = setup_app();

    let (status, body) = app
        .post("/ad/", json!({ "title": "bike", "owner_id": 42 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "owner not found" }));
}

#[tokio::test]
async fn get_unknown_ad_is_404() {
    let app = setup_app();

    let (status, body) = app.get("/ad/7/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "ad not found" }));
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() {
    let app = setup_app();
    let owner = app.create_user("alice").await;
    let (_, created) = app
        .post(
            "/ad/",
            json!({ "title": "bike", "description": "red", "owner_id": owner }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .patch(&format!("/ad/{id}/"), json!({ "title": "old bike" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "old bike");
    assert_eq!(body["description"], "red");
    assert_eq!(body["owner_id"], owner);
    assert_eq!(body["registration_time"], created["registration_time"]);

    let (_, fetched) = app.get(&format!("/ad/{id}/")).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn patch_can_clear_description_and_move_owner() {
    let app = setup_app();
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let (_, created) = app
        .post(
            "/ad/",
            json!({ "title": "bike", "description": "red", "owner_id": alice }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .patch(
            &format!("/ad/{id}/"),
            json!({ "description": null, "owner_id": bob.to_string() }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], serde_json::Value::Null);
    assert_eq!(body["owner_id"], bob);
    assert_eq!(body["name"], "bike");
}

#[tokio::test]
async fn patch_is_validated_like_create() {
    let app = setup_app();
    let owner = app.create_user("alice").await;
    let (_, created) = app
        .post("/ad/", json!({ "title": "bike", "owner_id": owner }))
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .patch(&format!("/ad/{id}/"), json!({ "title": 12 }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["field"], "title");

    let (status, body) = app
        .patch(&format!("/ad/{id}/"), json!({ "owner_id": 999 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "owner not found");

    let (_, fetched) = app.get(&format!("/ad/{id}/")).await;
    assert_eq!(fetched["name"], "bike");
    assert_eq!(fetched["owner_id"], owner);
}

#[tokio::test]
async fn patch_unknown_ad_is_404() {
    let app = setup_app();

    let (status, body) = app.patch("/ad/5/", json!({ "title": "x" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "ad not found");
}

#[tokio::test]
async fn delete_looks_up_the_ad_itself() {
    let app = setup_app();
    let owner = app.create_user("alice").await;
    let (_, created) = app
        .post("/ad/", json!({ "title": "bike", "owner_id": owner }))
        .await;
    let id = created["id"].as_i64().unwrap();

    // A user with the same numeric id must not be touched.
    let (status, body) = app.delete(&format!("/ad/{id}/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "deleted" }));

    let (status, _) = app.get(&format!("/ad/{id}/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/user/{owner}/")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.delete(&format!("/ad/{id}/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "ad not found");
}

#[tokio::test]
async fn non_integer_id_is_a_json_404() {
    let app = setup_app();

    let (status, body) = app.get("/ad/abc/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "ad not found" }));

    let (status, body) = app.delete("/ad/abc/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "ad not found" }));
}
