//! Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use axum_test::TestServer;
use rare::config::{SeedConfig, SeedUser};
use rare::prelude::*;
use serde_json::{Value, json};

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";
pub const STAFF_TOKEN: &str = "staff-token";

/// 1x1 transparent PNG
pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub struct TestApp {
    pub server: TestServer,
    pub store: EntityStore,
    pub images: InMemoryImageStore,
    pub alice: Uuid,
    pub bob: Uuid,
    pub staff: Uuid,
    pub category: Uuid,
    pub tags: Vec<Uuid>,
}

fn seed_user(username: &str, token: &str, is_staff: bool) -> SeedUser {
    SeedUser {
        username: username.to_string(),
        first_name: username.to_uppercase(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", username),
        is_staff,
        bio: None,
        token: Some(token.to_string()),
    }
}

async fn user_id(store: &EntityStore, username: &str) -> Uuid {
    store
        .users
        .list(&Filter::new().eq("username", username))
        .await
        .unwrap()[0]
        .id
}

pub async fn spawn_app() -> TestApp {
    let store = EntityStore::in_memory();
    let auth = TokenAuthProvider::new(store.users.clone());
    let images = InMemoryImageStore::new("/media/");

    let seed_config = SeedConfig {
        users: vec![
            seed_user("alice", ALICE_TOKEN, false),
            seed_user("bob", BOB_TOKEN, false),
            seed_user("moderator", STAFF_TOKEN, true),
        ],
        categories: vec!["News".to_string(), "Travel".to_string()],
        tags: vec!["rust".to_string(), "web".to_string(), "async".to_string()],
    };
    seed(&store, &auth, &seed_config).await.unwrap();

    let app = ServerBuilder::new()
        .with_store(store.clone())
        .with_image_store(images.clone())
        .with_auth_provider(auth)
        .build()
        .expect("Failed to build app");
    let server = TestServer::new(app);

    let category = store.categories.list(&Filter::new()).await.unwrap()[0].id;
    let tags = store
        .tags
        .list(&Filter::new())
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();

    TestApp {
        alice: user_id(&store, "alice").await,
        bob: user_id(&store, "bob").await,
        staff: user_id(&store, "moderator").await,
        server,
        store,
        images,
        category,
        tags,
    }
}

pub fn token(value: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Token {}", value)).unwrap(),
    )
}

pub fn post_body(category: Uuid, tags: &[Uuid]) -> Value {
    json!({
        "title": "First trip",
        "content": "We went north.",
        "publication_date": "2024-06-01",
        "image_url": PNG_DATA_URI,
        "approved": false,
        "category_id": category,
        "tags": tags,
    })
}

impl TestApp {
    /// Create a post as the given user and return its JSON payload
    pub async fn create_post(&self, as_token: &str, tags: &[Uuid]) -> Value {
        let (name, value) = token(as_token);
        let response = self
            .server
            .post("/posts")
            .add_header(name, value)
            .json(&post_body(self.category, tags))
            .await;
        response.assert_status_ok();
        response.json()
    }

    pub async fn create_comment(&self, as_token: &str, post_id: &str, content: &str) -> Value {
        let (name, value) = token(as_token);
        let response = self
            .server
            .post("/comments")
            .add_header(name, value)
            .json(&json!({ "post_id": post_id, "content": content }))
            .await;
        response.assert_status_ok();
        response.json()
    }
}
