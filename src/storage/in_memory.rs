//! In-memory implementations of DataService and LinkService

use crate::core::error::{RareResult, StorageError};
use crate::core::{DataService, Entity, Filter, LinkService, link::LinkEntity};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;
use validator::Validate;

fn poisoned(e: impl std::fmt::Display) -> StorageError {
    StorageError::LockPoisoned {
        message: e.to_string(),
    }
}

/// In-memory entity repository
///
/// Keeps insertion order, so listings are stable. Every save runs the
/// entity's field constraints before touching the map.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    entities: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T> InMemoryDataService<T> {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<Uuid, T>>, StorageError> {
        self.entities.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<Uuid, T>>, StorageError> {
        self.entities.write().map_err(poisoned)
    }
}

impl<T> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn find(&self, id: &Uuid) -> RareResult<Option<T>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn save(&self, entity: T) -> RareResult<T> {
        if let Err(errors) = entity.validate() {
            tracing::debug!(
                entity_type = T::resource_name_singular(),
                id = %entity.id(),
                "rejected save: {}",
                errors
            );
            return Err(errors.into());
        }

        self.write()?.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> RareResult<bool> {
        // shift_remove keeps the remaining insertion order intact
        Ok(self.write()?.shift_remove(id).is_some())
    }

    async fn list(&self, filter: &Filter) -> RareResult<Vec<T>> {
        let entities = self.read()?;
        Ok(entities
            .values()
            .filter(|entity| filter.matches(*entity))
            .cloned()
            .collect())
    }
}

/// Link store backing the post/tag relation
///
/// Links stay in creation order, which is the order a post lists its tags.
/// The server binary runs on this store as well as the tests.
#[derive(Clone)]
pub struct InMemoryLinkService {
    links: Arc<RwLock<IndexMap<Uuid, LinkEntity>>>,
}

impl InMemoryLinkService {
    /// Create a new in-memory link service
    pub fn new() -> Self {
        Self {
            links: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl Default for InMemoryLinkService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkService for InMemoryLinkService {
    async fn create(&self, link: LinkEntity) -> RareResult<LinkEntity> {
        let mut links = self.links.write().map_err(poisoned)?;

        links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_source(
        &self,
        source_id: &Uuid,
        link_type: &str,
    ) -> RareResult<Vec<LinkEntity>> {
        let links = self.links.read().map_err(poisoned)?;

        Ok(links
            .values()
            .filter(|link| &link.source_id == source_id && link.link_type == link_type)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &Uuid) -> RareResult<()> {
        let mut links = self.links.write().map_err(poisoned)?;

        links.shift_remove(id);

        Ok(())
    }

    async fn delete_by_entity(&self, entity_id: &Uuid) -> RareResult<()> {
        let mut links = self.links.write().map_err(poisoned)?;

        links.retain(|_, link| !link.involves(entity_id));

        Ok(())
    }
}
