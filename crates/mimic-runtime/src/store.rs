//! Persistent configuration store
//!
//! JSON on disk. A missing file means defaults; a missing key means
//! that key's default. Saves are atomic (write .tmp, then rename) so a
//! crash mid-save never leaves a torn config.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use mimic_core::{AppConfig, MimicError, MimicResult};

/// Load/save wrapper around [`AppConfig`]
pub struct ConfigStore {
    path: PathBuf,
    data: Mutex<AppConfig>,
}

impl ConfigStore {
    /// Create a store, loading from disk if the file exists
    pub fn new(path: PathBuf) -> Self {
        let data = Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
            AppConfig::default()
        });

        ConfigStore {
            path,
            data: Mutex::new(data),
        }
    }

    /// Read a config file, returning defaults when it does not exist
    pub fn load(path: &Path) -> MimicResult<AppConfig> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let contents =
            std::fs::read_to_string(path).map_err(|e| MimicError::Config(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| MimicError::Config(e.to_string()))
    }

    /// Current config snapshot
    pub fn get(&self) -> AppConfig {
        self.data.lock().clone()
    }

    /// Mutate the in-memory config; call [`ConfigStore::save`] to persist
    pub fn update(&self, f: impl FnOnce(&mut AppConfig)) {
        f(&mut self.data.lock());
    }

    /// Replace the in-memory config wholesale
    pub fn replace(&self, config: AppConfig) {
        *self.data.lock() = config;
    }

    /// Write the current config to disk atomically
    pub fn save(&self) -> MimicResult<()> {
        let data = self.data.lock().clone();
        let json =
            serde_json::to_string_pretty(&data).map_err(|e| MimicError::Config(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MimicError::Config(e.to_string()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(|e| MimicError::Config(e.to_string()))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| MimicError::Config(e.to_string()))?;

        Ok(())
    }
}
