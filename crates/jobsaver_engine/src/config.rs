//! Persisted user configuration: a flat string key/value store, like the
//! browser's extension storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use jobsaver_logging::{saver_debug, saver_warn};
use serde::{Deserialize, Serialize};

use crate::persist::{AtomicFileWriter, PersistError};

pub const CONFIG_FILENAME: &str = ".job_saver_config.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("failed to serialize config: {0}")]
    Serialize(String),
    #[error("config store lock poisoned")]
    Poisoned,
}

pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError>;
    fn remove(&self, key: &str) -> Result<(), ConfigError>;
    /// Drop every stored value.
    fn clear(&self) -> Result<(), ConfigError>;
}

#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let values = self.values.lock().map_err(|_| ConfigError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = self.values.lock().map_err(|_| ConfigError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        let mut values = self.values.lock().map_err(|_| ConfigError::Poisoned)?;
        values.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), ConfigError> {
        let mut values = self.values.lock().map_err(|_| ConfigError::Poisoned)?;
        values.clear();
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedConfig {
    values: BTreeMap<String, String>,
}

/// RON file in a config directory. Every read goes to disk, so separate
/// processes (background, popup, options) see each other's writes.
pub struct FileConfigStore {
    file: AtomicFileWriter,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicFileWriter::new(dir, CONFIG_FILENAME),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn load(&self) -> BTreeMap<String, String> {
        let path = self.path();
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return BTreeMap::new();
            }
            Err(err) => {
                saver_warn!("Failed to read config from {:?}: {}", path, err);
                return BTreeMap::new();
            }
        };

        match ron::from_str::<PersistedConfig>(&content) {
            Ok(config) => config.values,
            Err(err) => {
                saver_warn!("Failed to parse config from {:?}: {}", path, err);
                BTreeMap::new()
            }
        }
    }

    fn store(&self, values: BTreeMap<String, String>) -> Result<(), ConfigError> {
        let config = PersistedConfig { values };
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&config, pretty)
            .map_err(|err| ConfigError::Serialize(err.to_string()))?;
        self.file.write(&content)?;
        saver_debug!("Wrote config to {:?}", self.path());
        Ok(())
    }

    fn modify(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), ConfigError> {
        let _guard = self.lock.lock().map_err(|_| ConfigError::Poisoned)?;
        let mut values = self.load();
        change(&mut values);
        self.store(values)
    }

    pub fn dir(&self) -> &Path {
        self.file.dir()
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let _guard = self.lock.lock().map_err(|_| ConfigError::Poisoned)?;
        Ok(self.load().remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.modify(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        self.modify(|values| {
            values.remove(key);
        })
    }

    fn clear(&self) -> Result<(), ConfigError> {
        let _guard = self.lock.lock().map_err(|_| ConfigError::Poisoned)?;
        self.file.remove()?;
        Ok(())
    }
}
