//! Repository traits for entities and links

use crate::core::error::{RareError, RareResult};
use crate::core::{Entity, Filter, link::LinkEntity};
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for one entity type
///
/// Implementations provide CRUD operations for a specific entity type.
/// Services depend on this trait only, so any backend can be injected.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Get an entity by ID
    async fn find(&self, id: &Uuid) -> RareResult<Option<T>>;

    /// Insert or replace an entity
    ///
    /// Fails with a validation error when a field constraint is violated.
    async fn save(&self, entity: T) -> RareResult<T>;

    /// Delete an entity, returning whether it existed
    async fn delete(&self, id: &Uuid) -> RareResult<bool>;

    /// List entities matching a filter, in insertion order
    async fn list(&self, filter: &Filter) -> RareResult<Vec<T>>;

    /// Get an entity by ID, failing with `NotFound` when absent
    async fn get(&self, id: &Uuid) -> RareResult<T> {
        self.find(id)
            .await?
            .ok_or_else(|| RareError::not_found(T::resource_name_singular(), *id))
    }
}

/// Service trait for managing links between entities
///
/// This service is agnostic to entity types - it only manages
/// relationships using UUIDs and link type strings.
#[async_trait]
pub trait LinkService: Send + Sync {
    /// Create a new link between two entities
    async fn create(&self, link: LinkEntity) -> RareResult<LinkEntity>;

    /// Find links by source entity, in creation order
    async fn find_by_source(&self, source_id: &Uuid, link_type: &str)
    -> RareResult<Vec<LinkEntity>>;

    /// Delete a link
    async fn delete(&self, id: &Uuid) -> RareResult<()>;

    /// Delete all links involving a specific entity
    ///
    /// Used when deleting an entity to maintain referential integrity
    async fn delete_by_entity(&self, entity_id: &Uuid) -> RareResult<()>;
}
