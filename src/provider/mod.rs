//! Provider definitions, integration seams and the ordered provider registry.
//!
//! A provider owns one or more namespace prefixes and delegates item lookups
//! to an external integration. Providers are ordered; the order is the only
//! tie-break when two providers claim the same prefix. Exactly one provider,
//! [`ProviderKind::Vanilla`], is the universal fallback and is always tried
//! last.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`integration`] | Traits implemented by the host for each item registry |
//! | [`registry`] | Ordered, immutable provider list and its builder |

pub mod integration;
pub mod registry;

pub use integration::{CustomItemIntegration, IntegrationError, VanillaIntegration};
pub use registry::{Provider, ProviderRegistry, ProviderRegistryBuilder};

use crate::identifier::{self, SEPARATOR};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_.\-]+$").expect("namespace pattern must compile"));

/// Whether `namespace` is a well-formed namespace prefix (`[a-z0-9_.-]+`).
pub fn is_valid_namespace(namespace: &str) -> bool {
    NAMESPACE_RE.is_match(namespace)
}

/// Provider identity.
///
/// The built-in variants mirror the plugin ecosystems supported out of the
/// box. `Custom` covers any other registry declared through a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderKind {
    Oraxen,
    Nexo,
    ItemsAdder,
    /// The universal fallback.
    Vanilla,
    /// Arbitrary registry, keyed by its lower-case manifest name.
    Custom(String),
}

impl ProviderKind {
    /// Stable symbolic name, e.g. `"NEXO"`.
    pub fn identity(&self) -> String {
        match self {
            ProviderKind::Oraxen => "ORAXEN".to_string(),
            ProviderKind::Nexo => "NEXO".to_string(),
            ProviderKind::ItemsAdder => "ITEMSADDER".to_string(),
            ProviderKind::Vanilla => "VANILLA".to_string(),
            ProviderKind::Custom(name) => name.to_uppercase(),
        }
    }

    /// Manifest key, e.g. `"itemsadder"`.
    pub fn key(&self) -> &str {
        match self {
            ProviderKind::Oraxen => "oraxen",
            ProviderKind::Nexo => "nexo",
            ProviderKind::ItemsAdder => "itemsadder",
            ProviderKind::Vanilla => "vanilla",
            ProviderKind::Custom(name) => name.as_str(),
        }
    }

    /// Name of the plugin backing this provider. Empty for the fallback.
    pub fn default_plugin_name(&self) -> &str {
        match self {
            ProviderKind::Oraxen => "Oraxen",
            ProviderKind::Nexo => "Nexo",
            ProviderKind::ItemsAdder => "ItemsAdder",
            ProviderKind::Vanilla => "",
            ProviderKind::Custom(name) => name.as_str(),
        }
    }

    /// Namespaces claimed when none are configured.
    ///
    /// Nexo also answers to `oraxen` so ids written for its predecessor keep
    /// working when only Nexo is installed.
    pub fn default_namespaces(&self) -> Vec<String> {
        match self {
            ProviderKind::Oraxen => vec!["oraxen".to_string()],
            ProviderKind::Nexo => vec!["nexo".to_string(), "oraxen".to_string()],
            ProviderKind::ItemsAdder => vec!["itemsadder".to_string()],
            ProviderKind::Vanilla => vec!["minecraft".to_string()],
            ProviderKind::Custom(name) => vec![name.to_lowercase()],
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ProviderKind::Vanilla)
    }
}

impl From<String> for ProviderKind {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "oraxen" => ProviderKind::Oraxen,
            "nexo" => ProviderKind::Nexo,
            "itemsadder" => ProviderKind::ItemsAdder,
            "vanilla" | "minecraft" => ProviderKind::Vanilla,
            lower => ProviderKind::Custom(lower.to_string()),
        }
    }
}

impl From<&str> for ProviderKind {
    fn from(s: &str) -> Self {
        ProviderKind::from(s.to_string())
    }
}

impl From<ProviderKind> for String {
    fn from(kind: ProviderKind) -> Self {
        kind.key().to_string()
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}

/// Immutable description of a provider: who it is, which plugin it needs and
/// which namespaces it claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDef {
    kind: ProviderKind,
    plugin_name: String,
    namespaces: Vec<String>,
    enabled: bool,
}

impl ProviderDef {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            plugin_name: kind.default_plugin_name().to_string(),
            namespaces: kind.default_namespaces(),
            kind,
            enabled: true,
        }
    }

    pub fn with_plugin_name(mut self, name: impl Into<String>) -> Self {
        self.plugin_name = name.into();
        self
    }

    pub fn with_namespaces<S: Into<String>>(mut self, namespaces: impl IntoIterator<Item = S>) -> Self {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn kind(&self) -> &ProviderKind {
        &self.kind
    }

    pub fn identity(&self) -> String {
        self.kind.identity()
    }

    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Namespace written on identifiers this provider produces.
    pub fn primary_namespace(&self) -> Option<&str> {
        self.namespaces.first().map(String::as_str)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_fallback(&self) -> bool {
        self.kind.is_fallback()
    }

    /// The namespace of `id` that this provider claims, if `id` starts with
    /// one of its prefixes followed by the separator.
    pub fn matching_namespace(&self, id: &str) -> Option<&str> {
        let (namespace, _) = identifier::split(id);
        let namespace = namespace?;
        self.namespaces
            .iter()
            .find(|ns| ns.as_str() == namespace)
            .map(String::as_str)
    }

    /// Textual claim: the fallback claims everything, others claim their
    /// prefixes. Availability is not considered here.
    pub fn claims(&self, id: &str) -> bool {
        self.is_fallback() || self.matching_namespace(id).is_some()
    }

    /// Remove every `"<namespace>:"` occurrence for each declared namespace,
    /// in declaration order.
    pub fn strip_namespace(&self, id: &str) -> String {
        let mut stripped = id.to_string();
        for ns in &self.namespaces {
            stripped = stripped.replace(&format!("{}{}", ns, SEPARATOR), "");
        }
        stripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!(ProviderKind::from("Nexo"), ProviderKind::Nexo);
        assert_eq!(ProviderKind::from("ITEMSADDER"), ProviderKind::ItemsAdder);
        assert_eq!(ProviderKind::from("minecraft"), ProviderKind::Vanilla);
        assert_eq!(
            ProviderKind::from("MMOItems"),
            ProviderKind::Custom("mmoitems".to_string())
        );
        assert_eq!(ProviderKind::from("MMOItems"), ProviderKind::from("mmoitems"));
    }

    #[test]
    fn test_default_definitions() {
        let nexo = ProviderDef::new(ProviderKind::Nexo);
        assert_eq!(nexo.identity(), "NEXO");
        assert_eq!(nexo.plugin_name(), "Nexo");
        assert_eq!(nexo.namespaces(), &["nexo".to_string(), "oraxen".to_string()]);
        assert_eq!(nexo.primary_namespace(), Some("nexo"));

        let vanilla = ProviderDef::new(ProviderKind::Vanilla);
        assert_eq!(vanilla.plugin_name(), "");
        assert!(vanilla.is_fallback());

        let custom = ProviderDef::new(ProviderKind::from("MMOItems"));
        assert_eq!(custom.identity(), "MMOITEMS");
        assert_eq!(custom.namespaces(), &["mmoitems".to_string()]);
    }

    #[test]
    fn test_prefix_requires_separator() {
        let oraxen = ProviderDef::new(ProviderKind::Oraxen);
        assert_eq!(oraxen.matching_namespace("oraxen:ruby"), Some("oraxen"));
        assert_eq!(oraxen.matching_namespace("oraxenruby"), None);
        assert_eq!(oraxen.matching_namespace("oraxen_extra:ruby"), None);
        assert_eq!(oraxen.matching_namespace(""), None);
        assert!(!oraxen.claims("ruby"));
    }

    #[test]
    fn test_fallback_claims_everything() {
        let vanilla = ProviderDef::new(ProviderKind::Vanilla);
        assert!(vanilla.claims("stone"));
        assert!(vanilla.claims("nexo:golden_apple"));
        assert!(vanilla.claims(""));
    }

    #[test]
    fn test_strip_removes_every_alias() {
        let nexo = ProviderDef::new(ProviderKind::Nexo);
        assert_eq!(nexo.strip_namespace("nexo:golden_apple"), "golden_apple");
        assert_eq!(nexo.strip_namespace("oraxen:golden_apple"), "golden_apple");
        assert_eq!(nexo.strip_namespace("nexo:oraxen:ruby"), "ruby");
        assert_eq!(nexo.strip_namespace("golden_apple"), "golden_apple");
    }

    #[test]
    fn test_namespace_pattern() {
        assert!(is_valid_namespace("minecraft"));
        assert!(is_valid_namespace("my_pack-2.0"));
        assert!(!is_valid_namespace(""));
        assert!(!is_valid_namespace("Nexo"));
        assert!(!is_valid_namespace("a:b"));
    }
}
