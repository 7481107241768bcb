//! Macros for reducing boilerplate when defining entities

/// Implement [`Entity`](crate::core::entity::Entity) for a struct with an `id: Uuid` field
///
/// The listed fields become filterable through `field_value`; each must
/// convert into [`FieldValue`](crate::core::field::FieldValue).
///
/// # Example
///
/// ```rust,ignore
/// impl_entity!(Post, "post", "posts", [user_id, category_id, approved]);
///
/// let mine = posts.list(&Filter::new().eq("user_id", user.id)).await?;
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $singular:expr, $plural:expr, [$($field:ident),* $(,)?]) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                if field == "id" {
                    return Some(self.id.into());
                }
                $(
                    if field == stringify!($field) {
                        return Some(self.$field.clone().into());
                    }
                )*
                None
            }
        }
    };
}
