use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Key of the commit prefix remembered between runs.
pub const LAST_COMMIT_PREFIX: &str = "lastCommitPrefix";

/// Small persistent key-value capability for values remembered across runs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct StateFile {
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Stores values as a JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/branchkit/state.json`, falling back to the working directory.
    pub fn default_location() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("branchkit").join("state.json"))
    }

    fn load(&self) -> StateFile {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return StateFile::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable state file {}: {}", self.path.display(), e);
            StateFile::default()
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.load();
        state.values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&state)?)?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;
