//! Declarative provider table.
//!
//! A manifest lists providers in priority order, optionally overriding the
//! plugin name and namespaces of each one, and can disable providers without
//! touching code. The host then binds integrations to the declared providers
//! with [`ProviderRegistryBuilder::from_manifest`](crate::provider::ProviderRegistryBuilder::from_manifest).
//!
//! ```yaml
//! providers:
//!   - provider: oraxen
//!   - provider: nexo
//!     namespaces: [nexo, oraxen]
//!   - provider: itemsadder
//!     enabled: false
//!   - provider: mmoitems
//!     plugin: MMOItems
//!   - provider: vanilla
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`loader`] | Loading from YAML/JSON strings, files and the environment |
//! | [`validator`] | Ordering and namespace rules |
//! | [`error`] | Manifest-specific error types |

pub mod error;
pub mod loader;
pub mod validator;

pub use error::ManifestError;
pub use loader::PROVIDERS_PATH_ENV;
pub use validator::ValidationIssue;

use crate::provider::{ProviderDef, ProviderKind};
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// One provider declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderEntry {
    pub provider: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<String>>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ProviderEntry {
    pub fn new(provider: impl Into<ProviderKind>) -> Self {
        Self {
            provider: provider.into(),
            plugin: None,
            namespaces: None,
            enabled: true,
        }
    }

    pub fn definition(&self) -> ProviderDef {
        let mut def = ProviderDef::new(self.provider.clone()).with_enabled(self.enabled);
        if let Some(ref plugin) = self.plugin {
            def = def.with_plugin_name(plugin.clone());
        }
        if let Some(ref namespaces) = self.namespaces {
            def = def.with_namespaces(namespaces.iter().cloned());
        }
        def
    }
}

/// Ordered provider table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryManifest {
    pub providers: Vec<ProviderEntry>,
}

/// A namespace claimed by more than one enabled provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedNamespace {
    pub namespace: String,
    /// The earliest claimant; it wins every tie.
    pub winner: ProviderKind,
    pub shadowed: Vec<ProviderKind>,
}

impl RegistryManifest {
    pub fn new(providers: Vec<ProviderEntry>) -> Self {
        Self { providers }
    }

    /// Provider definitions in declaration order.
    pub fn definitions(&self) -> Vec<ProviderDef> {
        self.providers.iter().map(ProviderEntry::definition).collect()
    }

    /// Definitions as a registry would see them: the fallback is appended
    /// when the manifest leaves it out.
    pub fn effective_definitions(&self) -> Vec<ProviderDef> {
        let mut defs = self.definitions();
        if !defs.iter().any(ProviderDef::is_fallback) {
            defs.push(ProviderDef::new(ProviderKind::Vanilla));
        }
        defs
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        validator::check_definitions(&self.effective_definitions())
            .map_err(|issue| ManifestError::ValidationError(issue.to_string()))
    }

    /// Aliases claimed by several enabled providers, in first-claim order.
    pub fn shadowed_namespaces(&self) -> Vec<ShadowedNamespace> {
        let mut claims: Vec<(String, Vec<ProviderKind>)> = Vec::new();
        for def in self.effective_definitions().iter().filter(|d| d.is_enabled()) {
            for ns in def.namespaces() {
                match claims.iter_mut().find(|(seen, _)| seen == ns) {
                    Some((_, owners)) => owners.push(def.kind().clone()),
                    None => claims.push((ns.clone(), vec![def.kind().clone()])),
                }
            }
        }

        claims
            .into_iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(namespace, mut owners)| {
                let winner = owners.remove(0);
                ShadowedNamespace {
                    namespace,
                    winner,
                    shadowed: owners,
                }
            })
            .collect()
    }

    /// The provider that would own `id` if every enabled provider were active.
    pub fn claimant(&self, id: &str) -> ProviderKind {
        self.effective_definitions()
            .into_iter()
            .filter(ProviderDef::is_enabled)
            .find(|d| d.claims(id))
            .map(|d| d.kind().clone())
            .unwrap_or(ProviderKind::Vanilla)
    }
}

impl Default for RegistryManifest {
    /// The built-in order: Oraxen, Nexo, ItemsAdder, then vanilla.
    fn default() -> Self {
        Self::new(vec![
            ProviderEntry::new(ProviderKind::Oraxen),
            ProviderEntry::new(ProviderKind::Nexo),
            ProviderEntry::new(ProviderKind::ItemsAdder),
            ProviderEntry::new(ProviderKind::Vanilla),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_is_valid() {
        let manifest = RegistryManifest::default();
        assert!(manifest.validate().is_ok());
        assert_eq!(manifest.definitions().len(), 4);
    }

    #[test]
    fn test_default_shadowing_of_oraxen_alias() {
        let shadowed = RegistryManifest::default().shadowed_namespaces();
        assert_eq!(
            shadowed,
            vec![ShadowedNamespace {
                namespace: "oraxen".to_string(),
                winner: ProviderKind::Oraxen,
                shadowed: vec![ProviderKind::Nexo],
            }]
        );
    }

    #[test]
    fn test_disabled_provider_does_not_shadow() {
        let mut manifest = RegistryManifest::default();
        manifest.providers[0].enabled = false;
        assert!(manifest.shadowed_namespaces().is_empty());
        assert_eq!(manifest.claimant("oraxen:ruby"), ProviderKind::Nexo);
    }

    #[test]
    fn test_claimant() {
        let manifest = RegistryManifest::default();
        assert_eq!(manifest.claimant("oraxen:ruby"), ProviderKind::Oraxen);
        assert_eq!(manifest.claimant("nexo:golden_apple"), ProviderKind::Nexo);
        assert_eq!(manifest.claimant("itemsadder:ruby"), ProviderKind::ItemsAdder);
        assert_eq!(manifest.claimant("minecraft:stone"), ProviderKind::Vanilla);
        assert_eq!(manifest.claimant("stone"), ProviderKind::Vanilla);
        assert_eq!(manifest.claimant(""), ProviderKind::Vanilla);
    }

    #[test]
    fn test_implicit_fallback() {
        let manifest = RegistryManifest::new(vec![ProviderEntry::new("nexo")]);
        assert!(manifest.validate().is_ok());
        let defs = manifest.effective_definitions();
        assert_eq!(defs.len(), 2);
        assert!(defs[1].is_fallback());
    }

    #[test]
    fn test_entry_overrides() {
        let entry = ProviderEntry {
            provider: ProviderKind::from("mmoitems"),
            plugin: Some("MMOItems".to_string()),
            namespaces: Some(vec!["mmoitems".to_string(), "mi".to_string()]),
            enabled: true,
        };
        let def = entry.definition();
        assert_eq!(def.plugin_name(), "MMOItems");
        assert_eq!(def.primary_namespace(), Some("mmoitems"));
        assert!(def.claims("mi:cutlass"));
    }
}
