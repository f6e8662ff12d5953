//! Ordered provider registry.

use super::{CustomItemIntegration, IntegrationError, ProviderDef, ProviderKind, VanillaIntegration};
use crate::manifest::{validator, RegistryManifest};
use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

enum Backend<I> {
    Vanilla(Arc<dyn VanillaIntegration<I>>),
    /// `None` when the provider is declared but the host never bound an integration.
    Custom(Option<Arc<dyn CustomItemIntegration<I>>>),
}

/// A provider definition bound to its integration.
///
/// This is the single per-variant interface the resolver talks to; the
/// integration-specific branching lives here and nowhere else.
pub struct Provider<I> {
    def: ProviderDef,
    backend: Backend<I>,
}

impl<I> Provider<I> {
    pub fn def(&self) -> &ProviderDef {
        &self.def
    }

    pub fn kind(&self) -> &ProviderKind {
        self.def.kind()
    }

    pub fn identity(&self) -> String {
        self.def.identity()
    }

    pub fn plugin_name(&self) -> &str {
        self.def.plugin_name()
    }

    pub fn namespaces(&self) -> &[String] {
        self.def.namespaces()
    }

    pub fn is_fallback(&self) -> bool {
        self.def.is_fallback()
    }

    /// Point-in-time availability. The fallback is always available.
    pub fn is_available(&self) -> bool {
        match &self.backend {
            Backend::Vanilla(_) => true,
            Backend::Custom(Some(integration)) => self.def.is_enabled() && integration.is_active(),
            Backend::Custom(None) => false,
        }
    }

    /// Whether this provider, as currently available, claims `id`.
    pub fn claims(&self, id: &str) -> bool {
        self.is_available() && self.def.claims(id)
    }

    pub fn strip_namespace(&self, id: &str) -> String {
        self.def.strip_namespace(id)
    }

    /// Whether `id` names an existing item in this provider's registry.
    pub fn is_valid_item(&self, id: &str) -> bool {
        if !self.is_available() {
            return false;
        }
        let local_id = self.strip_namespace(id);
        match &self.backend {
            Backend::Vanilla(vanilla) => vanilla.match_type(&local_id).is_some(),
            Backend::Custom(Some(integration)) => integration.exists_by_id(&local_id),
            Backend::Custom(None) => false,
        }
    }

    /// Build a single item for `id`.
    pub fn parse_id_forward(&self, id: &str) -> Option<I> {
        if !self.is_valid_item(id) {
            return None;
        }
        let local_id = self.strip_namespace(id);
        let built = match &self.backend {
            Backend::Vanilla(vanilla) => match vanilla.match_type(&local_id) {
                Some(type_key) => vanilla.create_item(&type_key, 1),
                None => Ok(None),
            },
            Backend::Custom(Some(integration)) => integration.build_item(&local_id),
            Backend::Custom(None) => Ok(None),
        };
        self.absent_on_error(id, built)
    }

    /// Canonical identifier of `item`, if it belongs to this provider.
    ///
    /// The fallback passes the item's type key through unchanged; custom
    /// providers prefix the local id with their primary namespace.
    pub fn parse_id_backward(&self, item: &I) -> Option<String> {
        if !self.is_available() {
            return None;
        }
        match &self.backend {
            Backend::Vanilla(vanilla) => Some(vanilla.type_key(item)),
            Backend::Custom(Some(integration)) => {
                if !integration.exists_for_item(item) {
                    return None;
                }
                let namespace = self.def.primary_namespace()?;
                let local_id = self.absent_on_error("<item>", integration.id_for_item(item))?;
                Some(format!("{}:{}", namespace, local_id))
            }
            Backend::Custom(None) => None,
        }
    }

    fn absent_on_error<T>(&self, id: &str, result: std::result::Result<Option<T>, IntegrationError>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(e) => {
                warn!(provider = %self.def.identity(), id, error = %e, "integration lookup failed");
                None
            }
        }
    }
}

impl<I> fmt::Debug for Provider<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("def", &self.def)
            .field(
                "bound",
                &!matches!(self.backend, Backend::Custom(None)),
            )
            .finish()
    }
}

/// Fixed, ordered list of providers. Immutable once built; share with `Arc`.
pub struct ProviderRegistry<I> {
    providers: Vec<Provider<I>>,
    fallback_index: usize,
}

impl<I> ProviderRegistry<I> {
    pub fn builder() -> ProviderRegistryBuilder<I> {
        ProviderRegistryBuilder::new()
    }

    /// All providers in priority order. The fallback is last.
    pub fn providers(&self) -> &[Provider<I>] {
        &self.providers
    }

    /// Providers available right now, in priority order.
    pub fn available(&self) -> impl Iterator<Item = &Provider<I>> {
        self.providers.iter().filter(|p| p.is_available())
    }

    pub fn get(&self, kind: &ProviderKind) -> Option<&Provider<I>> {
        self.providers.iter().find(|p| p.kind() == kind)
    }

    pub fn fallback(&self) -> &Provider<I> {
        &self.providers[self.fallback_index]
    }

    /// Whether `kind` is registered and its integration is active.
    pub fn is_available(&self, kind: &ProviderKind) -> bool {
        self.get(kind).is_some_and(Provider::is_available)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl<I> fmt::Debug for ProviderRegistry<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.providers.iter()).finish()
    }
}

/// Declares providers in priority order and binds their integrations.
pub struct ProviderRegistryBuilder<I> {
    declared: Vec<ProviderDef>,
    custom: HashMap<ProviderKind, Arc<dyn CustomItemIntegration<I>>>,
    vanilla: Option<Arc<dyn VanillaIntegration<I>>>,
}

impl<I> ProviderRegistryBuilder<I> {
    pub fn new() -> Self {
        Self {
            declared: Vec::new(),
            custom: HashMap::new(),
            vanilla: None,
        }
    }

    /// Seed declarations from a manifest, keeping its order.
    pub fn from_manifest(manifest: &RegistryManifest) -> Self {
        let mut builder = Self::new();
        builder.declared = manifest.definitions();
        builder
    }

    /// Seed declarations from a manifest file (`.yaml`, `.yml` or `.json`).
    pub fn from_manifest_file(path: impl AsRef<Path>) -> Result<Self> {
        let manifest = RegistryManifest::load(path)?;
        Ok(Self::from_manifest(&manifest))
    }

    /// Declare a provider without binding an integration.
    pub fn declare(mut self, def: ProviderDef) -> Self {
        self.declared.push(def);
        self
    }

    /// Declare a provider and bind its integration.
    pub fn provider(self, def: ProviderDef, integration: Arc<dyn CustomItemIntegration<I>>) -> Self {
        let kind = def.kind().clone();
        self.declare(def).bind(kind, integration)
    }

    /// Bind an integration to an already declared provider.
    pub fn bind(mut self, kind: impl Into<ProviderKind>, integration: Arc<dyn CustomItemIntegration<I>>) -> Self {
        self.custom.insert(kind.into(), integration);
        self
    }

    /// Bind the fallback integration.
    pub fn vanilla(mut self, integration: Arc<dyn VanillaIntegration<I>>) -> Self {
        self.vanilla = Some(integration);
        self
    }

    pub fn build(mut self) -> Result<ProviderRegistry<I>> {
        if !self.declared.iter().any(ProviderDef::is_fallback) {
            self.declared.push(ProviderDef::new(ProviderKind::Vanilla));
        }

        validator::check_definitions(&self.declared).map_err(|issue| {
            Error::configuration_with_context(
                issue.message,
                ErrorContext::new()
                    .with_field_path(issue.field_path)
                    .with_source("registry_builder"),
            )
        })?;

        let Some(vanilla) = self.vanilla.take() else {
            return Err(Error::configuration_with_context(
                "no vanilla integration bound",
                ErrorContext::new()
                    .with_details("the fallback provider needs a VanillaIntegration")
                    .with_source("registry_builder"),
            ));
        };

        if let Some(kind) = self
            .custom
            .keys()
            .find(|kind| kind.is_fallback() || !self.declared.iter().any(|d| d.kind() == *kind))
        {
            return Err(Error::configuration_with_context(
                format!("integration bound for undeclared provider {}", kind),
                ErrorContext::new().with_source("registry_builder"),
            ));
        }

        let fallback_index = self.declared.len() - 1;
        let mut vanilla = Some(vanilla);
        let providers: Vec<Provider<I>> = self
            .declared
            .into_iter()
            .map(|def| {
                let backend = if def.is_fallback() {
                    // check_definitions guarantees exactly one fallback
                    match vanilla.take() {
                        Some(v) => Backend::Vanilla(v),
                        None => Backend::Custom(None),
                    }
                } else {
                    Backend::Custom(self.custom.remove(def.kind()))
                };
                Provider { def, backend }
            })
            .collect();

        debug!(
            order = ?providers.iter().map(Provider::identity).collect::<Vec<_>>(),
            "provider registry built"
        );

        Ok(ProviderRegistry {
            providers,
            fallback_index,
        })
    }
}

impl<I> Default for ProviderRegistryBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}
