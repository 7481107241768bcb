//! HTTP tests for the comment and catalog endpoints

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};

async fn post_with_comment(app: &TestApp) -> (String, Value) {
    let post = app.create_post(ALICE_TOKEN, &[app.tags[0], app.tags[2]]).await;
    let post_id = post["id"].as_str().unwrap().to_string();
    let comment = app.create_comment(BOB_TOKEN, &post_id, "Great read").await;
    (post_id, comment)
}

#[tokio::test]
async fn test_standalone_comment_shape() {
    let app = spawn_app().await;
    let (post_id, comment) = post_with_comment(&app).await;

    assert_eq!(comment["content"], "Great read");
    assert!(comment.get("user").is_none());
    assert!(comment.get("isAuthor").is_none());

    let post = &comment["post"];
    assert_eq!(post["id"], post_id);
    assert_eq!(post["category"], app.category.to_string());
    assert_eq!(post["user"], app.alice.to_string());
    assert_eq!(
        post["tags"],
        json!([app.tags[0].to_string(), app.tags[2].to_string()])
    );
    assert!(post.get("comments").is_none());
    assert!(post.get("is_post_author").is_none());
}

#[tokio::test]
async fn test_retrieve_and_list_comments() {
    let app = spawn_app().await;
    let (_, comment) = post_with_comment(&app).await;
    let path = format!("/comments/{}", comment["id"].as_str().unwrap());

    let response = app.server.get(&path).await;
    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(fetched, comment);

    let all: Value = app.server.get("/comments").await.json();
    assert_eq!(all, json!([comment]));

    app.server
        .get(&format!("/comments/{}", uuid::Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_comment_errors() {
    let app = spawn_app().await;
    let (post_id, _) = post_with_comment(&app).await;

    app.server
        .post("/comments")
        .json(&json!({ "post_id": post_id, "content": "anon" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = token(BOB_TOKEN);
    app.server
        .post("/comments")
        .add_header(name, value)
        .json(&json!({ "post_id": uuid::Uuid::new_v4(), "content": "lost" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let (name, value) = token(BOB_TOKEN);
    let response = app
        .server
        .post("/comments")
        .add_header(name, value)
        .json(&json!({ "post_id": post_id, "content": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert_eq!(error["details"]["fields"][0]["field"], "content");
}

#[tokio::test]
async fn test_create_comment_with_explicit_date() {
    let app = spawn_app().await;
    let post = app.create_post(ALICE_TOKEN, &[]).await;
    let (name, value) = token(BOB_TOKEN);

    let response = app
        .server
        .post("/comments")
        .add_header(name, value)
        .json(&json!({
            "post_id": post["id"],
            "content": "Dated",
            "created_on": "2023-12-24",
        }))
        .await;
    response.assert_status_ok();
    let comment: Value = response.json();
    assert_eq!(comment["created_on"], "2023-12-24");
}

#[tokio::test]
async fn test_update_comment() {
    let app = spawn_app().await;
    let (post_id, comment) = post_with_comment(&app).await;
    let path = format!("/comments/{}", comment["id"].as_str().unwrap());
    let body = json!({ "content": "Edited" });

    let (name, value) = token(ALICE_TOKEN);
    app.server
        .put(&path)
        .add_header(name, value)
        .json(&body)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = token(BOB_TOKEN);
    app.server
        .put(&path)
        .add_header(name, value)
        .json(&body)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let updated: Value = app.server.get(&path).await.json();
    assert_eq!(updated["content"], "Edited");
    assert_eq!(updated["post"]["id"], post_id);
    assert_eq!(updated["created_on"], comment["created_on"]);
}

#[tokio::test]
async fn test_delete_comment() {
    let app = spawn_app().await;
    let (post_id, comment) = post_with_comment(&app).await;
    let path = format!("/comments/{}", comment["id"].as_str().unwrap());

    let (name, value) = token(STAFF_TOKEN);
    app.server
        .delete(&path)
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let (name, value) = token(STAFF_TOKEN);
    app.server
        .delete(&path)
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let post: Value = app.server.get(&format!("/posts/{}", post_id)).await.json();
    assert_eq!(post["comments"], json!([]));
}

#[tokio::test]
async fn test_catalog_endpoints() {
    let app = spawn_app().await;

    let categories: Value = app.server.get("/categories").await.json();
    assert_eq!(categories.as_array().unwrap().len(), 2);
    assert_eq!(categories[0]["name"], "News");

    let (name, value) = token(ALICE_TOKEN);
    app.server
        .post("/tags")
        .add_header(name, value)
        .json(&json!({ "label": "travel" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = token(STAFF_TOKEN);
    let response = app
        .server
        .post("/tags")
        .add_header(name, value)
        .json(&json!({ "label": "travel" }))
        .await;
    response.assert_status_ok();
    let tag: Value = response.json();
    assert_eq!(tag["label"], "travel");

    let (name, value) = token(STAFF_TOKEN);
    app.server
        .post("/categories")
        .add_header(name, value)
        .json(&json!({ "name": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let tags: Value = app.server.get("/tags").await.json();
    assert_eq!(tags.as_array().unwrap().len(), 4);
}
