//! Entity trait defining the core abstraction for stored records

use crate::core::field::FieldValue;
use uuid::Uuid;
use validator::Validate;

/// Base trait for every record kept in a store.
///
/// Entities carry:
/// - id: Unique identifier
/// - resource names used in URLs and error messages
/// - dynamic field access used by [`Filter`](crate::core::query::Filter)
///
/// Field constraints come from the `Validate` supertrait and are checked by
/// the store on every save.
pub trait Entity: Clone + Send + Sync + Validate + 'static {
    /// The plural resource name used in URLs (e.g., "posts", "categories")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "post", "category")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::Filter;

    #[derive(Clone, Debug, Validate)]
    struct TestEntity {
        id: Uuid,
        owner_id: Uuid,
        published: bool,
    }

    impl Entity for TestEntity {
        fn resource_name() -> &'static str {
            "test_entities"
        }

        fn resource_name_singular() -> &'static str {
            "test_entity"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "id" => Some(self.id.into()),
                "owner_id" => Some(self.owner_id.into()),
                "published" => Some(self.published.into()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_filter_matches_fields() {
        let owner = Uuid::new_v4();
        let entity = TestEntity {
            id: Uuid::new_v4(),
            owner_id: owner,
            published: true,
        };

        assert!(Filter::new().matches(&entity));
        assert!(Filter::new().eq("owner_id", owner).matches(&entity));
        assert!(
            Filter::new()
                .eq("owner_id", owner)
                .eq("published", true)
                .matches(&entity)
        );
        assert!(!Filter::new().eq("owner_id", Uuid::new_v4()).matches(&entity));
        assert!(!Filter::new().eq("missing", true).matches(&entity));
    }
}
