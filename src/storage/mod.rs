//! Storage implementations and the aggregated entity store

pub mod in_memory;

pub use in_memory::{InMemoryDataService, InMemoryLinkService};

use crate::config::SeedConfig;
use crate::core::auth::TokenAuthProvider;
use crate::core::error::AuthError;
use crate::core::{AuthContext, DataService, Filter, LinkService, RareResult};
use crate::entities::{Author, Category, Comment, Post, Tag, User};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Aggregated store containing one repository per entity type
///
/// Services receive this by value; every field is a cheap `Arc` clone, so
/// any repository can be swapped for another backend. `write_gate` is shared
/// by every clone: mutations that read, check and then write hold it, which
/// keeps a comment from landing on a post that is being deleted.
#[derive(Clone)]
pub struct EntityStore {
    pub users: Arc<dyn DataService<User>>,
    pub authors: Arc<dyn DataService<Author>>,
    pub categories: Arc<dyn DataService<Category>>,
    pub tags: Arc<dyn DataService<Tag>>,
    pub posts: Arc<dyn DataService<Post>>,
    pub comments: Arc<dyn DataService<Comment>>,
    pub links: Arc<dyn LinkService>,
    pub write_gate: Arc<Mutex<()>>,
}

impl EntityStore {
    /// A store where every repository lives in memory
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryDataService::<User>::new()),
            authors: Arc::new(InMemoryDataService::<Author>::new()),
            categories: Arc::new(InMemoryDataService::<Category>::new()),
            tags: Arc::new(InMemoryDataService::<Tag>::new()),
            posts: Arc::new(InMemoryDataService::<Post>::new()),
            comments: Arc::new(InMemoryDataService::<Comment>::new()),
            links: Arc::new(InMemoryLinkService::new()),
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Find the author profile attached to a user, if any
    pub async fn author_of(&self, user: &User) -> RareResult<Option<Author>> {
        let authors = self
            .authors
            .list(&Filter::new().eq("user_id", user.id))
            .await?;
        Ok(authors.into_iter().next())
    }

    /// Resolve the user acting in a request
    ///
    /// Fails with `Unauthenticated` for anonymous contexts and for tokens
    /// whose user has since been deleted.
    pub async fn resolve_user(&self, auth: &AuthContext) -> RareResult<User> {
        let user_id = auth.require_user()?;
        self.users.find(&user_id).await?.ok_or_else(|| {
            AuthError::Unauthenticated {
                message: format!("user '{}' no longer exists", user_id),
            }
            .into()
        })
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Populate the store from the `seed` config section
///
/// Users get an author profile and, when a token is configured, a bearer
/// token. Categories and tags whose name already exists are skipped.
pub async fn seed(store: &EntityStore, auth: &TokenAuthProvider, seed: &SeedConfig) -> RareResult<()> {
    for seeded in &seed.users {
        let existing = store
            .users
            .list(&Filter::new().eq("username", seeded.username.as_str()))
            .await?;
        let user = match existing.into_iter().next() {
            Some(user) => user,
            None => {
                let mut user = User::new(
                    seeded.username.as_str(),
                    seeded.first_name.as_str(),
                    seeded.last_name.as_str(),
                    seeded.email.as_str(),
                );
                user.is_staff = seeded.is_staff;
                let user = store.users.save(user).await?;

                let mut author = Author::new(user.id);
                author.bio = seeded.bio.clone();
                store.authors.save(author).await?;
                user
            }
        };

        if let Some(token) = &seeded.token {
            auth.register(token.as_str(), user.id)?;
        }
        tracing::info!(username = %user.username, staff = user.is_staff, "seeded user");
    }

    for name in &seed.categories {
        let existing = store
            .categories
            .list(&Filter::new().eq("name", name.as_str()))
            .await?;
        if existing.is_empty() {
            store.categories.save(Category::new(name.as_str())).await?;
        }
    }

    for label in &seed.tags {
        let existing = store.tags.list(&Filter::new().eq("label", label.as_str())).await?;
        if existing.is_empty() {
            store.tags.save(Tag::new(label.as_str())).await?;
        }
    }

    tracing::info!(
        users = seed.users.len(),
        categories = seed.categories.len(),
        tags = seed.tags.len(),
        "seed data loaded"
    );
    Ok(())
}
