use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::errors::{ConfigError, Error, Result};

/// Key-value store for serialized configuration sections.
///
/// The analytics core persists four JSON-encoded sections (params, KPI,
/// channels, retention) under stable keys; implementations only need to store
/// opaque strings.
#[async_trait]
pub trait ConfigRepositoryTrait: Send + Sync {
    fn get_setting(&self, setting_key: &str) -> Result<String>;
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}

/// File-backed repository: one JSON object document on disk, written through
/// on every update.
pub struct FileConfigRepository {
    path: PathBuf,
    cache: RwLock<BTreeMap<String, String>>,
}

impl FileConfigRepository {
    /// Opens the document at `path`, starting empty when it does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let cache = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str::<BTreeMap<String, String>>(&raw)
                .map_err(|e| Error::Config(ConfigError::InvalidValue(e.to_string())))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    fn persist(&self, snapshot: &BTreeMap<String, String>) -> Result<()> {
        let encoded = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, encoded)?;
        Ok(())
    }
}

#[async_trait]
impl ConfigRepositoryTrait for FileConfigRepository {
    fn get_setting(&self, setting_key: &str) -> Result<String> {
        let cache = self
            .cache
            .read()
            .map_err(|e| Error::Config(ConfigError::CacheError(e.to_string())))?;
        cache
            .get(setting_key)
            .cloned()
            .ok_or_else(|| Error::Config(ConfigError::MissingKey(setting_key.to_string())))
    }

    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
        let snapshot = {
            let mut cache = self
                .cache
                .write()
                .map_err(|e| Error::Config(ConfigError::CacheError(e.to_string())))?;
            cache.insert(setting_key.to_string(), setting_value.to_string());
            cache.clone()
        };
        self.persist(&snapshot)
    }
}

/// In-memory repository, used by tests and embedders without persistence.
#[derive(Default)]
pub struct MemoryConfigRepository {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigRepositoryTrait for MemoryConfigRepository {
    fn get_setting(&self, setting_key: &str) -> Result<String> {
        let values = self
            .values
            .read()
            .map_err(|e| Error::Config(ConfigError::CacheError(e.to_string())))?;
        values
            .get(setting_key)
            .cloned()
            .ok_or_else(|| Error::Config(ConfigError::MissingKey(setting_key.to_string())))
    }

    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| Error::Config(ConfigError::CacheError(e.to_string())))?;
        values.insert(setting_key.to_string(), setting_value.to_string());
        Ok(())
    }
}
