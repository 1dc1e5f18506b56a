//! Static engine configuration supplied by the host.
//!
//! [`EngineConfig`] carries the three host-provided pieces the render path
//! treats as fixed for the lifetime of a node:
//!
//! - `folders`: ordered filesystem search roots for template fallback lookup
//! - `options`: engine options passed through to each fresh environment
//! - `globals`: the default context layer merged under every message payload
//!
//! Configuration can be built in code or loaded from YAML:
//!
//! ```rust
//! use flowjinja_render::config::EngineConfig;
//!
//! let config = EngineConfig::from_yaml(r#"
//! folders:
//!   - templates
//!   - shared/templates
//! options:
//!   trim_blocks: true
//! globals:
//!   site: example.org
//! "#).unwrap();
//!
//! assert_eq!(config.folders.len(), 2);
//! assert!(config.options.trim_blocks);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RenderError;

/// Engine options applied to every freshly built environment.
///
/// These are passed through unchanged; the render path does not interpret
/// them beyond handing each one to the engine. All fields default to the
/// engine's own defaults, so a partial or absent `options` block is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// HTML-escape rendered expressions.
    pub autoescape: bool,
    /// Strip the first newline after a block tag.
    pub trim_blocks: bool,
    /// Strip leading whitespace on lines holding only a block tag.
    pub lstrip_blocks: bool,
    /// Preserve a trailing newline at the end of the template.
    pub keep_trailing_newline: bool,
    /// Fail on undefined references instead of rendering them as empty.
    pub strict_undefined: bool,
}

/// Host-provided static configuration for a render node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ordered search roots; order is resolution priority and is fixed for
    /// the lifetime of the configuration.
    pub folders: Vec<PathBuf>,
    /// Opaque engine option set.
    pub options: EngineOptions,
    /// Default context values, overridden key-by-key by each message payload.
    pub globals: Map<String, Value>,
}

impl EngineConfig {
    /// Creates a configuration with no search roots, default options, and an
    /// empty default context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::new();
        assert!(config.folders.is_empty());
        assert!(config.globals.is_empty());
        assert_eq!(config.options, EngineOptions::default());
    }

    #[test]
    fn test_from_yaml_full() {
        let config = EngineConfig::from_yaml(
            r#"
folders:
  - templates
options:
  autoescape: true
  strict_undefined: true
globals:
  site: example.org
  retries: 3
"#,
        )
        .unwrap();

        assert_eq!(config.folders, vec![PathBuf::from("templates")]);
        assert!(config.options.autoescape);
        assert!(config.options.strict_undefined);
        assert!(!config.options.trim_blocks);
        assert_eq!(config.globals.get("site"), Some(&json!("example.org")));
        assert_eq!(config.globals.get("retries"), Some(&json!(3)));
    }

    #[test]
    fn test_from_yaml_partial() {
        // Missing sections fall back to defaults.
        let config = EngineConfig::from_yaml("folders: [a, b]").unwrap();
        assert_eq!(config.folders.len(), 2);
        assert!(config.globals.is_empty());
    }

    #[test]
    fn test_from_yaml_invalid() {
        let result = EngineConfig::from_yaml("folders: 12");
        assert!(matches!(result, Err(RenderError::Config(_))));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "globals:\n  env: test").unwrap();

        let config = EngineConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.globals.get("env"), Some(&json!("test")));
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let result = EngineConfig::from_yaml_file("/nonexistent/engine.yaml");
        assert!(matches!(result, Err(RenderError::Io(_))));
    }
}
