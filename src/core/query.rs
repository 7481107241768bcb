//! Equality filters passed to `DataService::list`

use crate::core::entity::Entity;
use crate::core::field::FieldValue;

/// A conjunction of `field == value` conditions
///
/// An empty filter matches every entity.
///
/// # Example
/// ```rust,ignore
/// let mine = posts.list(&Filter::new().eq("user_id", user.id)).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, FieldValue)>,
}

impl Filter {
    /// A filter matching everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition
    pub fn eq(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check whether an entity satisfies every condition
    ///
    /// Unknown fields never match.
    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| entity.field_value(field).as_ref() == Some(expected))
    }
}
