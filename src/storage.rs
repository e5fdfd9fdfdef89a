use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::azkar::AzkarList;
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Directory holding both data files.
/// On Windows: %APPDATA%/azkar-reminder
/// On other platforms: the dirs::config_dir() equivalent.
pub fn data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("azkar-reminder")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    match serde_json::from_str(&data) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!(
                "malformed JSON in {}, falling back to defaults: {e}",
                path.display()
            );
            Ok(None)
        }
    }
}

/// Write the full value as pretty JSON, creating parent directories if needed.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let data = serde_json::to_string_pretty(value).map_err(|e| StorageError::Encode {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, data).map_err(|e| StorageError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// File-backed settings record. The whole record is overwritten on every save.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        data_dir().join("settings.json")
    }

    /// Load settings. A missing file is seeded with defaults and persisted;
    /// malformed content falls back to defaults with a warning, leaving the
    /// file on disk untouched until the next save.
    pub fn load(&self) -> Result<Settings, StorageError> {
        match read_json::<Settings>(&self.path)? {
            Some(settings) => Ok(settings),
            None => {
                let settings = Settings::default();
                if !self.path.exists() {
                    self.save(&settings)?;
                }
                Ok(settings)
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        write_json(&self.path, settings)
    }
}

/// File-backed reminder list. Mutations persist the full ordered list.
pub struct AzkarStore {
    path: PathBuf,
}

impl AzkarStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        data_dir().join("azkar.json")
    }

    /// Load the list. A missing file is seeded with the four built-in
    /// entries and persisted; malformed content falls back to the seeded
    /// list with a warning.
    pub fn load(&self) -> Result<AzkarList, StorageError> {
        match read_json::<AzkarList>(&self.path)? {
            Some(list) => Ok(list),
            None => {
                let list = AzkarList::seeded();
                if !self.path.exists() {
                    self.save(&list)?;
                }
                Ok(list)
            }
        }
    }

    pub fn save(&self, list: &AzkarList) -> Result<(), StorageError> {
        write_json(&self.path, list)
    }

    /// Append a new entry and persist. Ok(false) means the input was blank
    /// and nothing was changed on disk or in memory.
    pub fn add(&self, list: &mut AzkarList, text: &str) -> Result<bool, StorageError> {
        if !list.add(text) {
            return Ok(false);
        }
        self.save(list)?;
        Ok(true)
    }

    /// Remove the first exactly-matching entry and persist. Ok(false) means
    /// no entry matched and nothing was changed on disk or in memory.
    pub fn remove(&self, list: &mut AzkarList, text: &str) -> Result<bool, StorageError> {
        if !list.remove(text) {
            return Ok(false);
        }
        self.save(list)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_store(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.json"))
    }

    fn azkar_store(dir: &tempfile::TempDir) -> AzkarStore {
        AzkarStore::new(dir.path().join("azkar.json"))
    }

    #[test]
    fn test_fresh_environment_seeds_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_store(&dir).load().unwrap();
        let list = azkar_store(&dir).load().unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(list.len(), 4);
        assert!(dir.path().join("settings.json").exists());
        assert!(dir.path().join("azkar.json").exists());

        let on_disk: Settings =
            serde_json::from_str(&fs::read_to_string(dir.path().join("settings.json")).unwrap())
                .unwrap();
        assert_eq!(on_disk.interval_minutes, 30);
        assert_eq!(on_disk.display_seconds, 5);
        assert!(on_disk.play_sound);
        assert!(!on_disk.start_with_windows);
    }

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = settings_store(&dir);
        let settings = Settings {
            interval_minutes: 45,
            display_seconds: 8,
            play_sound: false,
            start_with_windows: true,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_azkar_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = azkar_store(&dir);
        let mut list = AzkarList::new();
        list.add("c");
        list.add("a");
        list.add("b");
        list.add("a");
        store.save(&list).unwrap();

        let loaded = store.load().unwrap();
        let texts: Vec<&str> = loaded.entries().iter().map(|z| z.text.as_str()).collect();
        assert_eq!(texts, ["c", "a", "b", "a"]);
    }

    #[test]
    fn test_malformed_settings_falls_back_without_clobbering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not valid json!!!").unwrap();

        let settings = SettingsStore::new(path.clone()).load().unwrap();
        assert_eq!(settings, Settings::default());
        // The malformed file is only replaced on the next explicit save.
        assert_eq!(fs::read_to_string(&path).unwrap(), "not valid json!!!");
    }

    #[test]
    fn test_malformed_azkar_falls_back_to_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("azkar.json");
        fs::write(&path, "{\"broken\":").unwrap();

        let list = AzkarStore::new(path).load().unwrap();
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_add_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = azkar_store(&dir);
        let mut list = store.load().unwrap();
        assert!(store.add(&mut list, "ذكر جديد").unwrap());

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 5);
        assert_eq!(reloaded.entries()[4].text, "ذكر جديد");
    }

    #[test]
    fn test_add_blank_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = azkar_store(&dir);
        let mut list = store.load().unwrap();
        let before = fs::read_to_string(dir.path().join("azkar.json")).unwrap();

        assert!(!store.add(&mut list, "").unwrap());
        assert!(!store.add(&mut list, "   ").unwrap());

        assert_eq!(list.len(), 4);
        let after = fs::read_to_string(dir.path().join("azkar.json")).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_remove_absent_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = azkar_store(&dir);
        let mut list = store.load().unwrap();
        let before = fs::read_to_string(dir.path().join("azkar.json")).unwrap();

        assert!(!store.remove(&mut list, "not present").unwrap());

        assert_eq!(list.len(), 4);
        let after = fs::read_to_string(dir.path().join("azkar.json")).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = azkar_store(&dir);
        let mut list = store.load().unwrap();
        let victim = list.entries()[0].text.clone();
        assert!(store.remove(&mut list, &victim).unwrap());

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 3);
        assert!(reloaded.entries().iter().all(|z| z.text != victim));
    }
}
