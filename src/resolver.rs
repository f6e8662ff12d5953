//! Identifier and item resolution.
//!
//! The resolver walks the registry in declaration order and hands the actual
//! translation to the first provider that claims the identifier or item.
//! Nothing here fails: "not found" is `None`, unavailable providers are
//! skipped, and malformed identifiers fall through to the fallback.

use crate::provider::{Provider, ProviderRegistry};
use std::sync::Arc;
use tracing::{debug, trace};

/// Stateless resolver over a shared, immutable [`ProviderRegistry`].
pub struct Resolver<I> {
    registry: Arc<ProviderRegistry<I>>,
}

impl<I> Clone for Resolver<I> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<I> Resolver<I> {
    pub fn new(registry: Arc<ProviderRegistry<I>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry<I> {
        &self.registry
    }

    /// All providers in priority order.
    pub fn providers(&self) -> &[Provider<I>] {
        self.registry.providers()
    }

    /// The first available provider claiming `id`, else the fallback.
    pub fn resolve_by_identifier(&self, id: &str) -> &Provider<I> {
        for provider in self.registry.providers() {
            if !provider.is_available() {
                debug!(provider = %provider.identity(), id, "skipping unavailable provider");
                continue;
            }
            if provider.claims(id) {
                trace!(provider = %provider.identity(), id, "identifier resolved");
                return provider;
            }
        }
        self.registry.fallback()
    }

    /// The first available provider able to name `item`, else the fallback.
    pub fn resolve_by_item(&self, item: &I) -> &Provider<I> {
        self.resolve_item(item).0
    }

    /// Resolve `item` and translate it in one pass.
    pub fn resolve_item(&self, item: &I) -> (&Provider<I>, String) {
        for provider in self.registry.available() {
            if let Some(id) = provider.parse_id_backward(item) {
                trace!(provider = %provider.identity(), id = %id, "item resolved");
                return (provider, id);
            }
        }
        let fallback = self.registry.fallback();
        let id = fallback.parse_id_backward(item).unwrap_or_default();
        (fallback, id)
    }

    /// Remove every namespace of `provider` from `id`.
    pub fn strip_namespace(&self, id: &str, provider: &Provider<I>) -> String {
        provider.strip_namespace(id)
    }

    /// Strip `id` using the provider that owns it.
    ///
    /// `"minecraft:stone"` gives `"stone"`, `"nexo:golden_apple"` gives
    /// `"golden_apple"` while Nexo is available.
    pub fn strip(&self, id: &str) -> String {
        self.resolve_by_identifier(id).strip_namespace(id)
    }

    /// Build a single item for `id`.
    pub fn parse_to_item(&self, id: &str) -> Option<I> {
        self.resolve_by_identifier(id).parse_id_forward(id)
    }

    /// Canonical identifier of `item`.
    ///
    /// Vanilla items yield their type key unchanged; custom items yield
    /// `"<namespace>:<localId>"`.
    pub fn parse_to_identifier(&self, item: &I) -> String {
        self.resolve_item(item).1
    }

    /// Whether `id` names an existing item.
    pub fn exists(&self, id: &str) -> bool {
        let provider = self.resolve_by_identifier(id);
        provider.is_available() && provider.is_valid_item(id)
    }

    /// Canonical form of `id`: the identifier of the item it builds.
    /// `"stone"` and `"minecraft:STONE"` both give `"minecraft:stone"`.
    pub fn normalize(&self, id: &str) -> Option<String> {
        self.parse_to_item(id)
            .map(|item| self.parse_to_identifier(&item))
    }
}

impl<I> std::fmt::Debug for Resolver<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", &self.registry)
            .finish()
    }
}
