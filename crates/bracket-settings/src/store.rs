//! The string key/value store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::Result;

/// Well-known keys, carried verbatim from the original storage schema so
/// an exported settings file stays readable by both sides.
pub mod keys {
    /// Take-profit distance in ticks.
    pub const TAKE_PROFIT_TICKS: &str = "bracketTrade_tp";
    /// Stop-loss distance in ticks.
    pub const STOP_LOSS_TICKS: &str = "bracketTrade_sl";
    /// Contract quantity.
    pub const QUANTITY: &str = "bracketTrade_qty";
    /// Tick size override.
    pub const TICK_SIZE: &str = "bracketTrade_tick";
    /// Last traded symbol.
    pub const SYMBOL: &str = "bracketTrade_symbol";
    /// Panel drag position, "x,y".
    pub const PANEL_POSITION: &str = "bracketPanel_position";
}

/// Flat string map persisted as one JSON file.
///
/// Every `set` writes the whole file immediately; the store is small (a
/// handful of keys) and the original wrote on every input change, so
/// there is nothing to batch. A missing file is an empty store; an
/// unreadable one is an error rather than a silent reset.
pub struct SettingsStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl SettingsStore {
    /// Open the store at `path`, loading existing values if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let map: BTreeMap<String, String> = serde_json::from_str(&content)?;
            debug!(path = %path.display(), entries = map.len(), "settings loaded");
            map
        } else {
            debug!(path = %path.display(), "no settings file, starting empty");
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    /// Set one key and write the file through.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        self.flush()
    }

    /// Remove one key and write the file through.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.values.write().remove(key);
        self.flush()
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.values
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(dir) {
                    warn!(?e, "failed to create settings directory: {}", dir.display());
                }
            }
        }

        let json = serde_json::to_string_pretty(&*self.values.read())?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path().join("settings.json")).unwrap();
        assert!(store.entries().is_empty());
        assert_eq!(store.get(keys::SYMBOL), None);
    }

    #[test]
    fn test_set_writes_through_immediately() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::open(&path).unwrap();
        store.set(keys::SYMBOL, "NQ").unwrap();

        // A second store opened on the same path sees the value without
        // the first ever being dropped.
        let reread = SettingsStore::open(&path).unwrap();
        assert_eq!(reread.get(keys::SYMBOL).as_deref(), Some("NQ"));
    }

    #[test]
    fn test_roundtrip_all_known_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::open(&path).unwrap();
        store.set(keys::TAKE_PROFIT_TICKS, "53").unwrap();
        store.set(keys::STOP_LOSS_TICKS, "40").unwrap();
        store.set(keys::QUANTITY, "2").unwrap();
        store.set(keys::TICK_SIZE, "0.25").unwrap();
        store.set(keys::SYMBOL, "NQ").unwrap();
        store.set(keys::PANEL_POSITION, "820,240").unwrap();

        let reread = SettingsStore::open(&path).unwrap();
        assert_eq!(reread.entries().len(), 6);
        assert_eq!(reread.get(keys::PANEL_POSITION).as_deref(), Some("820,240"));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::open(&path).unwrap();
        store.set(keys::SYMBOL, "NQ").unwrap();
        store.remove(keys::SYMBOL).unwrap();

        let reread = SettingsStore::open(&path).unwrap();
        assert_eq!(reread.get(keys::SYMBOL), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json {").unwrap();

        assert!(SettingsStore::open(&path).is_err());
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/settings.json");

        let store = SettingsStore::open(&path).unwrap();
        store.set(keys::SYMBOL, "ES").unwrap();
        assert!(path.exists());
    }
}
