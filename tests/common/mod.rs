//! Shared fixtures: in-memory integrations with switchable availability.

#![allow(dead_code)]

use item_identity::provider::{
    CustomItemIntegration, IntegrationError, ProviderRegistryBuilder, VanillaIntegration,
};
use item_identity::{MaterialCatalog, ProviderKind, RegistryManifest, Resolver};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Host item stand-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestItem {
    Vanilla { key: String, amount: u32 },
    Custom { registry: String, id: String },
}

pub struct TestVanilla {
    catalog: MaterialCatalog,
}

impl TestVanilla {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            catalog: MaterialCatalog::new(["STONE", "DIRT", "GOLDEN_APPLE", "DIAMOND_SWORD", "PAPER"]),
        })
    }
}

impl VanillaIntegration<TestItem> for TestVanilla {
    fn match_type(&self, name: &str) -> Option<String> {
        self.catalog.match_type(name)
    }

    fn create_item(&self, type_key: &str, amount: u32) -> Result<Option<TestItem>, IntegrationError> {
        Ok(Some(TestItem::Vanilla {
            key: type_key.to_string(),
            amount,
        }))
    }

    fn type_key(&self, item: &TestItem) -> String {
        match item {
            TestItem::Vanilla { key, .. } => key.clone(),
            // custom items are skinned paper underneath
            TestItem::Custom { .. } => "minecraft:paper".to_string(),
        }
    }
}

/// A custom-item plugin registry.
pub struct TestPlugin {
    name: String,
    items: BTreeSet<String>,
    active: AtomicBool,
}

impl TestPlugin {
    pub fn new(name: &str, items: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
            active: AtomicBool::new(true),
        })
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub fn item(&self, id: &str) -> TestItem {
        TestItem::Custom {
            registry: self.name.clone(),
            id: id.to_string(),
        }
    }
}

impl CustomItemIntegration<TestItem> for TestPlugin {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn exists_by_id(&self, local_id: &str) -> bool {
        self.items.contains(local_id)
    }

    fn build_item(&self, local_id: &str) -> Result<Option<TestItem>, IntegrationError> {
        Ok(self.exists_by_id(local_id).then(|| self.item(local_id)))
    }

    fn id_for_item(&self, item: &TestItem) -> Result<Option<String>, IntegrationError> {
        Ok(match item {
            TestItem::Custom { registry, id } if *registry == self.name => Some(id.clone()),
            _ => None,
        })
    }
}

/// Registry that claims every id exists but fails every lookup.
pub struct BrokenPlugin;

impl CustomItemIntegration<TestItem> for BrokenPlugin {
    fn is_active(&self) -> bool {
        true
    }

    fn exists_by_id(&self, _local_id: &str) -> bool {
        true
    }

    fn build_item(&self, local_id: &str) -> Result<Option<TestItem>, IntegrationError> {
        Err(IntegrationError::lookup_failed("Broken", local_id, "item builder missing"))
    }

    fn id_for_item(&self, _item: &TestItem) -> Result<Option<String>, IntegrationError> {
        Err(IntegrationError::Other("registry not loaded".to_string()))
    }

    fn exists_for_item(&self, _item: &TestItem) -> bool {
        true
    }
}

pub struct Fixture {
    pub resolver: Resolver<TestItem>,
    pub oraxen: Arc<TestPlugin>,
    pub nexo: Arc<TestPlugin>,
    pub itemsadder: Arc<TestPlugin>,
}

/// Default order with all three custom registries bound and active.
pub fn fixture() -> Fixture {
    fixture_with(&RegistryManifest::default())
}

pub fn fixture_with(manifest: &RegistryManifest) -> Fixture {
    let oraxen = TestPlugin::new("Oraxen", &["ruby", "mythril_sword"]);
    let nexo = TestPlugin::new("Nexo", &["golden_apple", "ruby", "amethyst_crown"]);
    let itemsadder = TestPlugin::new("ItemsAdder", &["ruby", "fancy_hat"]);

    let registry = ProviderRegistryBuilder::<TestItem>::from_manifest(manifest)
        .bind(ProviderKind::Oraxen, oraxen.clone())
        .bind(ProviderKind::Nexo, nexo.clone())
        .bind(ProviderKind::ItemsAdder, itemsadder.clone())
        .vanilla(TestVanilla::new())
        .build()
        .expect("fixture registry");

    Fixture {
        resolver: Resolver::new(Arc::new(registry)),
        oraxen,
        nexo,
        itemsadder,
    }
}
