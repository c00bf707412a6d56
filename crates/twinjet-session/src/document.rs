//! YAML/JSON document loading by file extension.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{SessionError, SessionResult};

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.yaml` or `.yml`.
    Yaml,
    /// `.json`.
    Json,
}

impl DocumentFormat {
    /// Pick the format from a path's extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> SessionResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(DocumentFormat::Yaml),
            Some("json") => Ok(DocumentFormat::Json),
            _ => Err(SessionError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parse `text` in this format.
    ///
    /// # Errors
    ///
    /// Returns the YAML or JSON parse error.
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> SessionResult<T> {
        match self {
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
            DocumentFormat::Json => Ok(serde_json::from_str(text)?),
        }
    }
}

/// Read and parse a YAML or JSON file.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the file cannot be
/// read, or its contents do not parse.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> SessionResult<T> {
    let format = DocumentFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), ?format, "Loading document");
    format.parse(&text)
}
