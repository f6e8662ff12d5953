//! Item identifier value type.
//!
//! An identifier is `namespace:localId` or a bare `localId`. Bare ids belong
//! to the fallback (vanilla) namespace implicitly. Only the first `:` splits,
//! so `a:b:c` has namespace `a` and local id `b:c`.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator between namespace and local id.
pub const SEPARATOR: char = ':';

/// Split `raw` into its namespace (if any) and local id without allocating.
pub fn split(raw: &str) -> (Option<&str>, &str) {
    match raw.split_once(SEPARATOR) {
        Some((namespace, local_id)) => (Some(namespace), local_id),
        None => (None, raw),
    }
}

/// A parsed `[namespace:]localId` identifier.
///
/// Parsing never fails: an empty or otherwise malformed string simply has no
/// namespace, which degrades to fallback resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ItemId {
    raw: String,
    split: Option<usize>,
}

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let split = raw.find(SEPARATOR);
        Self { raw, split }
    }

    /// Build `namespace:local_id`.
    pub fn namespaced(namespace: &str, local_id: &str) -> Self {
        Self::new(format!("{}{}{}", namespace, SEPARATOR, local_id))
    }

    pub fn namespace(&self) -> Option<&str> {
        self.split.map(|i| &self.raw[..i])
    }

    pub fn local_id(&self) -> &str {
        match self.split {
            Some(i) => &self.raw[i + SEPARATOR.len_utf8()..],
            None => &self.raw,
        }
    }

    pub fn is_bare(&self) -> bool {
        self.split.is_none()
    }

    /// Whether this id carries `namespace` as its explicit prefix.
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespace() == Some(namespace)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ItemId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.raw
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
