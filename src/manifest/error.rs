//! Manifest error types

/// Manifest error types
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to load provider manifest from {path}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    LoadError {
        path: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("Provider manifest validation failed: {0}")]
    ValidationError(String),

    #[error("YAML syntax error: {0}")]
    YamlError(String),

    #[error("JSON syntax error: {0}")]
    JsonError(String),
}

impl ManifestError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        if let ManifestError::LoadError { ref mut hint, .. } = self {
            *hint = hint_val;
        }
        self
    }
}
