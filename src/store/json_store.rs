use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::{ProgressData, UserRegistryData};

/// JSON-file persistence rooted at the platform data dir. One file per
/// user's progress record plus one registry file. Writes go through a
/// tmp file and rename so a crash never leaves a torn record.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocadr");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn progress_path(&self, user: &str) -> PathBuf {
        self.base_dir.join(format!("progress_{user}.json"))
    }

    fn registry_path(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, path: &PathBuf) -> T {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, path: &PathBuf, data: &T) -> Result<()> {
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Load a user's progress record. Missing file, parse failure, and a
    /// stale schema version all yield a fresh default — absence is a
    /// valid empty state, never an error.
    pub fn load_progress(&self, user: &str) -> ProgressData {
        let progress: ProgressData = self.load_or_default(&self.progress_path(user));
        if progress.needs_reset() {
            ProgressData::default()
        } else {
            progress
        }
    }

    pub fn save_progress(&self, user: &str, data: &ProgressData) -> Result<()> {
        self.save(&self.progress_path(user), data)
    }

    /// Remove a user's record from disk. Missing files are fine.
    pub fn delete_progress(&self, user: &str) {
        let _ = fs::remove_file(self.progress_path(user));
    }

    pub fn load_registry(&self) -> UserRegistryData {
        self.load_or_default(&self.registry_path())
    }

    pub fn save_registry(&self, data: &UserRegistryData) -> Result<()> {
        self.save(&self.registry_path(), data)
    }
}
