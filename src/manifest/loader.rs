//! Manifest loading from strings, local files and the environment.

use super::{ManifestError, RegistryManifest};
use std::path::Path;
use tracing::debug;

/// Environment variable naming a manifest file to load.
pub const PROVIDERS_PATH_ENV: &str = "ITEM_PROVIDERS_PATH";

impl RegistryManifest {
    /// Parse and validate a YAML manifest.
    pub fn from_yaml_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: RegistryManifest =
            serde_yaml::from_str(content).map_err(|e| ManifestError::YamlError(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse and validate a JSON manifest.
    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: RegistryManifest =
            serde_json::from_str(content).map_err(|e| ManifestError::JsonError(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest file. `.json` is parsed as JSON, `.yaml`/`.yml` as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let display = path.to_string_lossy().to_string();

        let bytes = std::fs::read(path).map_err(|e| ManifestError::LoadError {
            path: display.clone(),
            reason: e.to_string(),
            hint: Some("Check if the file exists and you have read permissions.".to_string()),
        })?;

        let content = decode_text(&bytes).map_err(|reason| ManifestError::LoadError {
            path: display.clone(),
            reason,
            hint: None,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let manifest = match extension.as_deref() {
            Some("json") => Self::from_json_str(&content)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            _ => {
                return Err(ManifestError::LoadError {
                    path: display,
                    reason: "unsupported manifest extension".to_string(),
                    hint: None,
                }
                .with_hint("Use a .yaml, .yml or .json file."))
            }
        };

        debug!(path = %path.display(), providers = manifest.providers.len(), "provider manifest loaded");
        Ok(manifest)
    }

    /// Load the manifest named by `ITEM_PROVIDERS_PATH`, if the variable is set.
    pub fn from_env() -> Result<Option<Self>, ManifestError> {
        match std::env::var(PROVIDERS_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()).map(Some),
            _ => Ok(None),
        }
    }
}

/// Decode UTF-8 (with or without BOM) or UTF-16 LE with BOM.
fn decode_text(bytes: &[u8]) -> Result<String, String> {
    if bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xFE {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|e| format!("Invalid UTF-16: {}", e))
    } else if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8(bytes[3..].to_vec()).map_err(|e| format!("Invalid UTF-8 (after BOM): {}", e))
    } else {
        String::from_utf8(bytes.to_vec()).map_err(|e| format!("Invalid UTF-8: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderKind;

    #[test]
    fn test_yaml_manifest() {
        let manifest = RegistryManifest::from_yaml_str(
            r#"
providers:
  - provider: nexo
    namespaces: [nexo, oraxen]
  - provider: itemsadder
    enabled: false
  - provider: mmoitems
    plugin: MMOItems
  - provider: vanilla
"#,
        )
        .unwrap();

        assert_eq!(manifest.providers.len(), 4);
        assert_eq!(manifest.providers[0].provider, ProviderKind::Nexo);
        assert!(!manifest.providers[1].enabled);
        assert_eq!(
            manifest.providers[2].provider,
            ProviderKind::Custom("mmoitems".to_string())
        );
        assert_eq!(manifest.providers[2].plugin.as_deref(), Some("MMOItems"));
    }

    #[test]
    fn test_json_manifest() {
        let manifest = RegistryManifest::from_json_str(
            r#"{"providers": [{"provider": "oraxen"}, {"provider": "minecraft"}]}"#,
        )
        .unwrap();
        assert_eq!(manifest.providers[1].provider, ProviderKind::Vanilla);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = RegistryManifest::from_yaml_str("providers:\n  - provider: nexo\n    priority: 3\n")
            .unwrap_err();
        assert!(matches!(err, ManifestError::YamlError(_)));
    }

    #[test]
    fn test_rejects_invalid_order() {
        let err = RegistryManifest::from_yaml_str(
            "providers:\n  - provider: vanilla\n  - provider: nexo\n",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Provider manifest validation failed: providers[0]: fallback provider must be last"
        );
    }

    #[test]
    fn test_decode_text_boms() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFproviders: []").unwrap(), "providers: []");
        let utf16: Vec<u8> = [0xFF, 0xFE]
            .into_iter()
            .chain("ok".encode_utf16().flat_map(|u| u.to_le_bytes()))
            .collect();
        assert_eq!(decode_text(&utf16).unwrap(), "ok");
        assert!(decode_text(&[0xC3, 0x28]).is_err());
    }
}
