//! Structural checks on an ordered provider table.

use crate::provider::{is_valid_namespace, ProviderDef};

/// A single rule violation, located by manifest path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field_path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_path, self.message)
    }
}

/// Check an ordered provider table. Reports the first violation found.
///
/// Rules: exactly one fallback, placed last and enabled; no provider kind
/// twice; every non-fallback provider claims at least one namespace; every
/// namespace matches `[a-z0-9_.-]+`; no enabled provider's primary namespace
/// is already claimed by an earlier enabled provider, since the identifiers
/// it writes would resolve elsewhere.
pub fn check_definitions(defs: &[ProviderDef]) -> Result<(), ValidationIssue> {
    let fallbacks: Vec<usize> = defs
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_fallback())
        .map(|(i, _)| i)
        .collect();

    match fallbacks.as_slice() {
        [index] => {
            if *index != defs.len() - 1 {
                return Err(ValidationIssue::new(
                    format!("providers[{}]", index),
                    "fallback provider must be last",
                ));
            }
            if !defs[*index].is_enabled() {
                return Err(ValidationIssue::new(
                    format!("providers[{}].enabled", index),
                    "fallback provider cannot be disabled",
                ));
            }
        }
        other => {
            return Err(ValidationIssue::new(
                "providers",
                format!("expected exactly one fallback provider, found {}", other.len()),
            ));
        }
    }

    for (i, def) in defs.iter().enumerate() {
        if defs[..i].iter().any(|earlier| earlier.kind() == def.kind()) {
            return Err(ValidationIssue::new(
                format!("providers[{}].provider", i),
                format!("duplicate provider {}", def.kind()),
            ));
        }

        if !def.is_fallback() && def.namespaces().is_empty() {
            return Err(ValidationIssue::new(
                format!("providers[{}].namespaces", i),
                format!("provider {} declares no namespaces", def.kind()),
            ));
        }

        for (k, ns) in def.namespaces().iter().enumerate() {
            if !is_valid_namespace(ns) {
                return Err(ValidationIssue::new(
                    format!("providers[{}].namespaces[{}]", i, k),
                    format!("invalid namespace '{}'", ns),
                ));
            }
        }

        if let Some(primary) = def.primary_namespace().filter(|_| def.is_enabled()) {
            let owner = defs[..i]
                .iter()
                .filter(|earlier| earlier.is_enabled())
                .find(|earlier| earlier.namespaces().iter().any(|ns| ns == primary));
            if let Some(owner) = owner {
                return Err(ValidationIssue::new(
                    format!("providers[{}].namespaces[0]", i),
                    format!(
                        "primary namespace '{}' of {} is already claimed by {}",
                        primary,
                        def.kind(),
                        owner.kind()
                    ),
                ));
            }
        }
    }

    Ok(())
}
