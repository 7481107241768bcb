//! HTTP tests for the post endpoints

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};

fn tag_ids(post: &Value) -> Vec<String> {
    post["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Create
// =============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_post_with_image() {
        let app = spawn_app().await;
        let body = app.create_post(ALICE_TOKEN, &[app.tags[0]]).await;

        assert_eq!(body["category"]["id"], app.category.to_string());
        assert_eq!(body["category"]["name"], "News");
        assert_eq!(body["user"]["id"], app.alice.to_string());
        assert_eq!(body["is_post_author"], true);
        assert_eq!(body["approved"], false);
        assert_eq!(body["comments"], json!([]));

        let image_url = body["image_url"].as_str().unwrap();
        assert!(image_url.starts_with("/media/First trip-"));
        assert!(image_url.ends_with(".png"));

        let names = app.images.names();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".png"));
    }

    #[tokio::test]
    async fn test_create_post_unknown_category() {
        let app = spawn_app().await;
        let (name, value) = token(ALICE_TOKEN);

        let response = app
            .server
            .post("/posts")
            .add_header(name, value)
            .json(&post_body(uuid::Uuid::new_v4(), &[]))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "ENTITY_NOT_FOUND");
        assert!(app.images.is_empty());
    }

    #[tokio::test]
    async fn test_create_post_malformed_image() {
        let app = spawn_app().await;
        let (name, value) = token(ALICE_TOKEN);
        let mut body = post_body(app.category, &[]);
        body["image_url"] = json!("data:image/png,iVBORw0KGgo=");

        let response = app.server.post("/posts").add_header(name, value).json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["code"], "INVALID_DATA_URI");
        assert!(app.images.is_empty());

        let posts: Value = app.server.get("/posts").await.json();
        assert_eq!(posts, json!([]));
    }

    #[tokio::test]
    async fn test_create_post_deduplicates_tags() {
        let app = spawn_app().await;
        let tags = [app.tags[1], app.tags[1], app.tags[0]];
        let body = app.create_post(ALICE_TOKEN, &tags).await;

        assert_eq!(
            tag_ids(&body),
            vec![app.tags[1].to_string(), app.tags[0].to_string()]
        );
    }

    #[tokio::test]
    async fn test_create_post_requires_authentication() {
        let app = spawn_app().await;

        let response = app
            .server
            .post("/posts")
            .json(&post_body(app.category, &[]))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let (name, value) = token("not-a-real-token");
        let response = app
            .server
            .post("/posts")
            .add_header(name, value)
            .json(&post_body(app.category, &[]))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_post_invalid_body() {
        let app = spawn_app().await;
        let (name, value) = token(ALICE_TOKEN);

        let response = app
            .server
            .post("/posts")
            .add_header(name, value)
            .json(&json!({ "title": "no content" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["code"], "INVALID_BODY");
    }
}

// =============================================================================
// Retrieve and list
// =============================================================================

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_is_post_author_follows_requester() {
        let app = spawn_app().await;
        let created = app.create_post(ALICE_TOKEN, &[]).await;
        let path = format!("/posts/{}", created["id"].as_str().unwrap());

        let (name, value) = token(ALICE_TOKEN);
        let as_owner: Value = app.server.get(&path).add_header(name, value).await.json();
        assert_eq!(as_owner["is_post_author"], true);

        let (name, value) = token(BOB_TOKEN);
        let as_other: Value = app.server.get(&path).add_header(name, value).await.json();
        assert_eq!(as_other["is_post_author"], false);

        let anonymous: Value = app.server.get(&path).await.json();
        assert_eq!(anonymous["is_post_author"], false);
    }

    #[tokio::test]
    async fn test_nested_comments_carry_user_and_flag() {
        let app = spawn_app().await;
        let created = app.create_post(ALICE_TOKEN, &[]).await;
        let post_id = created["id"].as_str().unwrap();
        app.create_comment(BOB_TOKEN, post_id, "Lovely").await;

        let (name, value) = token(BOB_TOKEN);
        let post: Value = app
            .server
            .get(&format!("/posts/{}", post_id))
            .add_header(name, value)
            .await
            .json();

        let comment = &post["comments"][0];
        assert_eq!(comment["content"], "Lovely");
        assert_eq!(comment["isAuthor"], true);
        assert_eq!(comment["user"]["id"], app.bob.to_string());
        assert!(comment["user"]["author"].is_object());
        assert_eq!(post["is_post_author"], false);
    }

    #[tokio::test]
    async fn test_retrieve_missing_and_invalid_ids() {
        let app = spawn_app().await;

        let response = app
            .server
            .get(&format!("/posts/{}", uuid::Uuid::new_v4()))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = app.server.get("/posts/not-a-uuid").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["code"], "INVALID_ID");
    }

    #[tokio::test]
    async fn test_list_my_posts() {
        let app = spawn_app().await;
        app.create_post(ALICE_TOKEN, &[]).await;
        app.create_post(BOB_TOKEN, &[]).await;
        app.create_post(ALICE_TOKEN, &[]).await;
        app.create_post(BOB_TOKEN, &[]).await;

        let (name, value) = token(ALICE_TOKEN);
        let mine: Value = app
            .server
            .get("/posts/myposts")
            .add_header(name, value)
            .await
            .json();
        let mine = mine.as_array().unwrap();
        assert_eq!(mine.len(), 2);
        for post in mine {
            assert_eq!(post["user"]["id"], app.alice.to_string());
            assert_eq!(post["is_post_author"], true);
        }

        let all: Value = app.server.get("/posts").await.json();
        assert_eq!(all.as_array().unwrap().len(), 4);

        app.server
            .get("/posts/myposts")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

// =============================================================================
// Update, approve, delete
// =============================================================================

mod write_tests {
    use super::*;

    fn update_body(category: uuid::Uuid, tags: Value) -> Value {
        json!({
            "title": "Second trip",
            "content": "We went south.",
            "category_id": category,
            "tags": tags,
        })
    }

    #[tokio::test]
    async fn test_update_replaces_tags() {
        let app = spawn_app().await;
        let created = app.create_post(ALICE_TOKEN, &[app.tags[0], app.tags[1]]).await;
        let path = format!("/posts/{}", created["id"].as_str().unwrap());

        let (name, value) = token(ALICE_TOKEN);
        let tags = json!([{ "id": app.tags[1] }, { "id": app.tags[2] }]);
        app.server
            .put(&path)
            .add_header(name, value)
            .json(&update_body(app.category, tags))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let post: Value = app.server.get(&path).await.json();
        assert_eq!(post["title"], "Second trip");
        assert_eq!(
            tag_ids(&post),
            vec![app.tags[1].to_string(), app.tags[2].to_string()]
        );
    }

    #[tokio::test]
    async fn test_update_permissions() {
        let app = spawn_app().await;
        let created = app.create_post(ALICE_TOKEN, &[]).await;
        let path = format!("/posts/{}", created["id"].as_str().unwrap());
        let body = update_body(app.category, json!([]));

        app.server
            .put(&path)
            .json(&body)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let (name, value) = token(BOB_TOKEN);
        let response = app.server.put(&path).add_header(name, value).json(&body).await;
        response.assert_status(StatusCode::FORBIDDEN);
        let error: Value = response.json();
        assert_eq!(error["code"], "FORBIDDEN");

        let (name, value) = token(STAFF_TOKEN);
        app.server
            .put(&path)
            .add_header(name, value)
            .json(&body)
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let app = spawn_app().await;
        let (name, value) = token(ALICE_TOKEN);

        app.server
            .put(&format!("/posts/{}", uuid::Uuid::new_v4()))
            .add_header(name, value)
            .json(&update_body(app.category, json!([])))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_approve_post() {
        let app = spawn_app().await;
        let created = app.create_post(ALICE_TOKEN, &[]).await;
        let path = format!("/posts/{}/approve", created["id"].as_str().unwrap());

        let (name, value) = token(ALICE_TOKEN);
        app.server
            .put(&path)
            .add_header(name, value)
            .json(&json!({ "approved": true }))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let (name, value) = token(STAFF_TOKEN);
        let response = app
            .server
            .put(&path)
            .add_header(name, value)
            .json(&json!({ "approved": true }))
            .await;
        response.assert_status_ok();
        let post: Value = response.json();
        assert_eq!(post["approved"], true);
        assert_eq!(post["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_delete_post_cascades() {
        let app = spawn_app().await;
        let created = app.create_post(ALICE_TOKEN, &[app.tags[0]]).await;
        let post_id = created["id"].as_str().unwrap();
        let comment = app.create_comment(BOB_TOKEN, post_id, "bye").await;
        let path = format!("/posts/{}", post_id);

        let (name, value) = token(ALICE_TOKEN);
        app.server
            .delete(&path)
            .add_header(name, value)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        app.server
            .get(&format!("/comments/{}", comment["id"].as_str().unwrap()))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let comments: Value = app.server.get("/comments").await.json();
        assert_eq!(comments, json!([]));
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let app = spawn_app().await;
        let (name, value) = token(ALICE_TOKEN);

        app.server
            .delete(&format!("/posts/{}", uuid::Uuid::new_v4()))
            .add_header(name, value)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_by_other_user_is_forbidden() {
        let app = spawn_app().await;
        let created = app.create_post(ALICE_TOKEN, &[]).await;
        let path = format!("/posts/{}", created["id"].as_str().unwrap());

        let (name, value) = token(BOB_TOKEN);
        app.server
            .delete(&path)
            .add_header(name, value)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        app.server.get(&path).await.assert_status_ok();
    }
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;
    app.server.get("/health").await.assert_status_ok();
}
