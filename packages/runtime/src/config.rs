//! Framework configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FrameworkError, Result};

/// Configuration for a framework instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameworkConfig {
    /// Ecosystem name reported by the handle.
    pub name: String,
    /// Emit a `trace!` event for every processor dispatch.
    pub trace_dispatch: bool,
    /// Leave catalogs that allow API registration open after startup.
    pub allow_catalog_registration: bool,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            name: "aspect".to_string(),
            trace_dispatch: false,
            allow_catalog_registration: true,
        }
    }
}

impl FrameworkConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FrameworkError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = FrameworkConfig::default();
        assert_eq!(config.name, "aspect");
        assert!(!config.trace_dispatch);
        assert!(config.allow_catalog_registration);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = FrameworkConfig::from_json(r#"{"trace_dispatch": true}"#).unwrap();
        assert!(config.trace_dispatch);
        assert_eq!(config.name, "aspect");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = FrameworkConfig::from_json(r#"{"tracedispatch": true}"#).unwrap_err();
        assert!(matches!(err, FrameworkError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "sponge", "allow_catalog_registration": false}}"#
        )
        .unwrap();

        let config = FrameworkConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "sponge");
        assert!(!config.allow_catalog_registration);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FrameworkConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FrameworkError::ConfigRead { .. }));
    }
}
