//! Integration seams.
//!
//! The host implements these traits for each plugin registry it can talk to.
//! All lookups are optional-returning; an `Err` means the integration itself
//! misbehaved and is treated as "no match" by the resolver.

/// Failure raised by an integration while answering a lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrationError {
    #[error("integration '{plugin}' is not available")]
    Unavailable { plugin: String },

    #[error("integration '{plugin}' failed to look up '{id}': {reason}")]
    LookupFailed {
        plugin: String,
        id: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl IntegrationError {
    pub fn lookup_failed(
        plugin: impl Into<String>,
        id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        IntegrationError::LookupFailed {
            plugin: plugin.into(),
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// A custom-item registry owned by a third-party plugin.
///
/// Ids passed in are local ids, already stripped of the provider's
/// namespaces. Implementations must be safe for concurrent read-only use.
pub trait CustomItemIntegration<I>: Send + Sync {
    /// Whether the backing plugin is currently enabled. Called on every
    /// resolution, so it must be cheap and side-effect free.
    fn is_active(&self) -> bool;

    /// Registry lookup by local id.
    fn exists_by_id(&self, local_id: &str) -> bool;

    /// Build a single item for `local_id`.
    fn build_item(&self, local_id: &str) -> Result<Option<I>, IntegrationError>;

    /// Local id of `item` in this registry, if it belongs to it.
    fn id_for_item(&self, item: &I) -> Result<Option<String>, IntegrationError>;

    /// Whether `item` belongs to this registry.
    fn exists_for_item(&self, item: &I) -> bool {
        matches!(self.id_for_item(item), Ok(Some(_)))
    }
}

/// The vanilla type system, backing the fallback provider.
pub trait VanillaIntegration<I>: Send + Sync {
    /// Match a (possibly namespaced, loosely formatted) type name to its
    /// canonical `namespace:id` key.
    fn match_type(&self, name: &str) -> Option<String>;

    /// Create `amount` items of the type with canonical key `type_key`.
    fn create_item(&self, type_key: &str, amount: u32) -> Result<Option<I>, IntegrationError>;

    /// Canonical `namespace:id` key of the item's base type. Every item has one.
    fn type_key(&self, item: &I) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnlyIds;

    impl CustomItemIntegration<String> for OnlyIds {
        fn is_active(&self) -> bool {
            true
        }
        fn exists_by_id(&self, local_id: &str) -> bool {
            local_id == "ruby"
        }
        fn build_item(&self, local_id: &str) -> Result<Option<String>, IntegrationError> {
            Ok(self.exists_by_id(local_id).then(|| local_id.to_string()))
        }
        fn id_for_item(&self, item: &String) -> Result<Option<String>, IntegrationError> {
            if item == "broken" {
                return Err(IntegrationError::lookup_failed("OnlyIds", item, "corrupt"));
            }
            Ok(self.exists_by_id(item).then(|| item.clone()))
        }
    }

    #[test]
    fn test_exists_for_item_default() {
        let integration = OnlyIds;
        assert!(integration.exists_for_item(&"ruby".to_string()));
        assert!(!integration.exists_for_item(&"stone".to_string()));
        assert!(!integration.exists_for_item(&"broken".to_string()));
    }

    #[test]
    fn test_error_display() {
        let err = IntegrationError::lookup_failed("Nexo", "golden_apple", "null item builder");
        assert_eq!(
            err.to_string(),
            "integration 'Nexo' failed to look up 'golden_apple': null item builder"
        );
    }
}
