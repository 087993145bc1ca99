use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use viewer_core::{ConfigError, ViewportConfig};

const CONFIG_SCHEMA_VERSION: u32 = 1;
const CONFIG_FILE_NAME: &str = "viewport.json";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unable to resolve local data directory")]
    NoDataDirectory,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unsupported config schema version {found}")]
    UnsupportedVersion { found: u32 },
    #[error("invalid viewport config: {0}")]
    Invalid(#[from] ConfigError),
}

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigEnvelope {
    version: u32,
    config: ViewportConfig,
}

impl Storage {
    pub fn from_default_project() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("dev", "PdfViewport", "PdfViewport")
            .ok_or(StorageError::NoDataDirectory)?;

        Ok(Self { root: dirs.data_local_dir().to_path_buf() })
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Loads the stored config, falling back to defaults when none was saved.
    pub fn load_config(&self) -> Result<ViewportConfig, StorageError> {
        let path = self.config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no stored viewport config, using defaults");
            return Ok(ViewportConfig::default());
        }

        load_config_file(&path)
    }

    pub fn save_config(&self, config: &ViewportConfig) -> Result<(), StorageError> {
        config.validate()?;
        fs::create_dir_all(&self.root)?;

        let envelope = ConfigEnvelope { version: CONFIG_SCHEMA_VERSION, config: config.clone() };

        let bytes = serde_json::to_vec_pretty(&envelope)?;
        fs::write(self.config_path(), bytes)?;
        tracing::debug!(path = %self.config_path().display(), "saved viewport config");
        Ok(())
    }
}

/// Reads a config envelope from an explicit path.
pub fn load_config_file(path: &Path) -> Result<ViewportConfig, StorageError> {
    let bytes = fs::read(path)?;
    let envelope: ConfigEnvelope = serde_json::from_slice(&bytes)?;

    if envelope.version != CONFIG_SCHEMA_VERSION {
        return Err(StorageError::UnsupportedVersion { found: envelope.version });
    }

    envelope.config.validate()?;
    Ok(envelope.config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = Storage::with_root(temp.path());

        let config = ViewportConfig::default()
            .with_scrollbar_width(16.0)
            .with_top_toolbar_height(56.0)
            .with_default_zoom(1.25);

        store.save_config(&config).expect("save should succeed");
        let loaded = store.load_config().expect("load should succeed");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_defaults_when_file_absent() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = Storage::with_root(temp.path());

        let loaded = store.load_config().expect("load should succeed");
        assert_eq!(loaded, ViewportConfig::default());
    }

    #[test]
    fn saved_file_is_versioned() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = Storage::with_root(temp.path().join("nested"));

        store.save_config(&ViewportConfig::default()).expect("save should succeed");

        let raw = fs::read_to_string(store.config_path()).expect("config file should exist");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("file should be json");
        assert_eq!(value["version"], 1);
        assert_eq!(value["config"]["default_zoom"], 1.0);
    }

    #[test]
    fn rejects_unknown_version() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"version": 7, "config": {}}"#).expect("write should succeed");

        let error = load_config_file(&path).expect_err("version 7 should be rejected");
        assert!(matches!(error, StorageError::UnsupportedVersion { found: 7 }));
    }

    #[test]
    fn rejects_invalid_config() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = Storage::with_root(temp.path());

        let config = ViewportConfig::default().with_zoom_factors(Vec::new());
        let error = store.save_config(&config).expect_err("empty zoom factors should be rejected");
        assert!(matches!(error, StorageError::Invalid(ConfigError::NoZoomFactors)));

        fs::write(store.config_path(), r#"{"version": 1, "config": {"default_zoom": -2}}"#)
            .expect("write should succeed");
        let error = store.load_config().expect_err("negative zoom should be rejected");
        assert!(matches!(error, StorageError::Invalid(ConfigError::InvalidDefaultZoom(_))));
    }
}
