//! # item-identity
//!
//! Cross-plugin item identity for game servers: resolve a namespaced
//! identifier such as `"nexo:golden_apple"` or `"minecraft:stone"` to a
//! concrete item, and map an item back to its canonical identifier, across
//! several custom-item plugin registries plus a vanilla fallback.
//!
//! ## Overview
//!
//! Providers are declared in a fixed priority order. Each one claims a set of
//! namespace prefixes and delegates lookups to an integration supplied by the
//! host. Resolution walks the order and picks the first *available* provider
//! that claims the identifier (or can name the item); the vanilla provider is
//! always last and claims everything else.
//!
//! Items are opaque to this crate: registries and resolvers are generic over
//! the host's item type.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use item_identity::provider::ProviderRegistryBuilder;
//! use item_identity::{RegistryManifest, Resolver};
//! # use item_identity::provider::{VanillaIntegration, IntegrationError};
//! # struct Types;
//! # impl VanillaIntegration<String> for Types {
//! #     fn match_type(&self, name: &str) -> Option<String> { Some(format!("minecraft:{name}")) }
//! #     fn create_item(&self, key: &str, _: u32) -> Result<Option<String>, IntegrationError> { Ok(Some(key.into())) }
//! #     fn type_key(&self, item: &String) -> String { item.clone() }
//! # }
//! use std::sync::Arc;
//!
//! fn main() -> item_identity::Result<()> {
//!     let manifest = RegistryManifest::default();
//!     let registry = ProviderRegistryBuilder::<String>::from_manifest(&manifest)
//!         .vanilla(Arc::new(Types))
//!         .build()?;
//!
//!     let resolver = Resolver::new(Arc::new(registry));
//!     assert!(resolver.parse_to_item("stone").is_some());
//!     assert_eq!(resolver.resolve_by_identifier("nexo:golden_apple").identity(), "VANILLA");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`identifier`] | `[namespace:]localId` value type |
//! | [`provider`] | Provider definitions, integration traits and the ordered registry |
//! | [`resolver`] | Identifier and item resolution |
//! | [`vanilla`] | Loose vanilla material name matching |
//! | [`manifest`] | Declarative provider table loaded from YAML or JSON |

pub mod identifier;
pub mod manifest;
pub mod provider;
pub mod resolver;
pub mod vanilla;

pub use identifier::ItemId;
pub use manifest::{ManifestError, RegistryManifest};
pub use provider::{
    CustomItemIntegration, IntegrationError, Provider, ProviderDef, ProviderKind, ProviderRegistry,
    VanillaIntegration,
};
pub use resolver::Resolver;
pub use vanilla::MaterialCatalog;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
