//! Categories and tags that posts refer to

pub mod handlers;

use crate::core::{AuthContext, AuthPolicy, DataService, Filter, RareResult};
use crate::entities::{Category, Tag};
use crate::serialization::{CategoryPayload, TagPayload};
use crate::storage::EntityStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub label: String,
}

pub struct CatalogService {
    store: EntityStore,
    manage_policy: AuthPolicy,
}

impl CatalogService {
    pub fn new(store: EntityStore, manage_policy: AuthPolicy) -> Self {
        Self {
            store,
            manage_policy,
        }
    }

    pub async fn list_categories(&self) -> RareResult<Vec<CategoryPayload>> {
        let categories = self.store.categories.list(&Filter::new()).await?;
        Ok(categories.iter().map(CategoryPayload::from).collect())
    }

    pub async fn create_category(
        &self,
        auth: &AuthContext,
        req: CreateCategoryRequest,
    ) -> RareResult<CategoryPayload> {
        self.store.resolve_user(auth).await?;
        self.manage_policy.enforce(auth, None, "manage categories")?;

        let category = self.store.categories.save(Category::new(req.name)).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "created category");
        Ok(CategoryPayload::from(&category))
    }

    pub async fn list_tags(&self) -> RareResult<Vec<TagPayload>> {
        let tags = self.store.tags.list(&Filter::new()).await?;
        Ok(tags.iter().map(TagPayload::from).collect())
    }

    pub async fn create_tag(&self, auth: &AuthContext, req: CreateTagRequest) -> RareResult<TagPayload> {
        self.store.resolve_user(auth).await?;
        self.manage_policy.enforce(auth, None, "manage tags")?;

        let tag = self.store.tags.save(Tag::new(req.label)).await?;
        tracing::info!(tag_id = %tag.id, label = %tag.label, "created tag");
        Ok(TagPayload::from(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;
    use crate::core::RareError;
    use crate::entities::User;

    #[tokio::test]
    async fn test_only_staff_manages_catalog() {
        let store = EntityStore::in_memory();
        let service = CatalogService::new(store.clone(), PolicyConfig::default().manage_catalog);

        let reader = store
            .users
            .save(User::new("reader", "R", "R", "reader@example.com"))
            .await
            .unwrap();
        let mut admin = User::new("admin", "A", "A", "admin@example.com");
        admin.is_staff = true;
        let admin = store.users.save(admin).await.unwrap();

        let err = service
            .create_tag(&AuthContext::for_user(&reader), CreateTagRequest { label: "rust".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, RareError::Auth(_)));

        let staff = AuthContext::for_user(&admin);
        let tag = service
            .create_tag(&staff, CreateTagRequest { label: "rust".into() })
            .await
            .unwrap();
        let category = service
            .create_category(&staff, CreateCategoryRequest { name: "News".into() })
            .await
            .unwrap();

        assert_eq!(service.list_tags().await.unwrap(), vec![tag]);
        assert_eq!(service.list_categories().await.unwrap(), vec![category]);

        let err = service
            .create_category(&staff, CreateCategoryRequest { name: String::new() })
            .await
            .unwrap_err();
        assert!(matches!(err, RareError::Validation(_)));
    }
}
