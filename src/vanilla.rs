//! Vanilla material name matching.
//!
//! Hosts back their [`VanillaIntegration`](crate::provider::VanillaIntegration)
//! with a [`MaterialCatalog`] so the fallback provider accepts names the same
//! loose way the game does: `stone`, `STONE`, `minecraft:stone` and
//! `Golden Apple` all match.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Namespace of every vanilla type key.
pub const VANILLA_NAMESPACE: &str = "minecraft";

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("non-word pattern must compile"));

/// Known vanilla material names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialCatalog {
    names: BTreeSet<String>,
}

impl MaterialCatalog {
    pub fn new<S: AsRef<str>>(materials: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: materials
                .into_iter()
                .map(|m| normalize(m.as_ref()))
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Canonical upper-case material name matching `name`.
    ///
    /// A leading `minecraft:` is dropped, the rest is upper-cased, whitespace
    /// runs become `_` and any other non-word character is removed. A foreign
    /// namespace therefore never matches (`nexo:golden_apple` becomes
    /// `NEXOGOLDEN_APPLE`).
    pub fn match_material(&self, name: &str) -> Option<&str> {
        self.names.get(&normalize(name)).map(String::as_str)
    }

    /// Canonical `minecraft:<name>` key for `name`.
    pub fn match_type(&self, name: &str) -> Option<String> {
        self.match_material(name).map(type_key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.match_material(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `STONE` -> `minecraft:stone`
pub fn type_key(material: &str) -> String {
    format!("{}:{}", VANILLA_NAMESPACE, material.to_ascii_lowercase())
}

fn normalize(name: &str) -> String {
    let prefix = format!("{}:", VANILLA_NAMESPACE);
    let filtered = name.strip_prefix(prefix.as_str()).unwrap_or(name);
    let upper = filtered.to_uppercase();
    let underscored = WHITESPACE_RE.replace_all(&upper, "_");
    NON_WORD_RE.replace_all(&underscored, "").into_owned()
}
