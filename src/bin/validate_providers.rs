//! Validate a provider manifest and show how identifiers would resolve.
//!
//! Usage: `validate-providers [MANIFEST] [ID...]`
//!
//! The manifest path defaults to `ITEM_PROVIDERS_PATH`; without either, the
//! built-in provider order is checked. Each `ID` is reported with the
//! provider that would claim it if every enabled provider were active.

use anyhow::Context;
use item_identity::manifest::PROVIDERS_PATH_ENV;
use item_identity::{ItemId, RegistryManifest};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1).peekable();
    let from_arg = args.next_if(|a| a.ends_with(".yaml") || a.ends_with(".yml") || a.ends_with(".json"));
    let ids: Vec<String> = args.collect();

    let manifest = match from_arg {
        Some(path) => {
            println!("Using provider manifest: {}", path);
            RegistryManifest::load(&path).with_context(|| format!("invalid manifest {}", path))?
        }
        None => match RegistryManifest::from_env()
            .with_context(|| format!("invalid manifest named by {}", PROVIDERS_PATH_ENV))?
        {
            Some(manifest) => {
                println!("Using provider manifest from {}", PROVIDERS_PATH_ENV);
                manifest
            }
            None => {
                println!("Using built-in provider order");
                RegistryManifest::default()
            }
        },
    };

    println!("\n=== Provider Order ===");
    for (i, def) in manifest.effective_definitions().iter().enumerate() {
        let plugin = if def.plugin_name().is_empty() {
            "-"
        } else {
            def.plugin_name()
        };
        println!(
            "{:>2}. {:<12} plugin={:<12} namespaces=[{}]{}",
            i + 1,
            def.identity(),
            plugin,
            def.namespaces().join(", "),
            if def.is_enabled() { "" } else { " (disabled)" }
        );
    }

    let shadowed = manifest.shadowed_namespaces();
    if !shadowed.is_empty() {
        println!("\n=== Shared Namespaces ===");
        for entry in &shadowed {
            let losers: Vec<String> = entry.shadowed.iter().map(|k| k.identity()).collect();
            println!(
                "'{}' resolves to {} first (also claimed by {})",
                entry.namespace,
                entry.winner,
                losers.join(", ")
            );
        }
    }

    if !ids.is_empty() {
        println!("\n=== Resolution ===");
        for id in &ids {
            let parsed = ItemId::new(id.as_str());
            println!(
                "{} -> {} (namespace: {}, local id: {})",
                id,
                manifest.claimant(id),
                parsed.namespace().unwrap_or("-"),
                parsed.local_id()
            );
        }
    }

    println!("\nManifest is valid.");
    Ok(())
}
