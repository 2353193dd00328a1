use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// The six canonical settings keys. All of them are guaranteed to be present
/// after `ConfigStore::open`; an empty string means "unset".
pub const SETTING_KEYS: [&str; 6] = [
    "dest",
    "username",
    "password",
    "token",
    "base_dir",
    "dst_dir",
];

/// Flat key/value settings persisted as a human-editable JSON object.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Load settings from `path`, creating or repairing the file as needed.
    ///
    /// A missing file starts from the empty template. An unreadable or
    /// structurally invalid file (not a flat string map) is reinitialized to
    /// the six-key template; the operator only sees a logged diagnostic.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!("config file is invalid ({err}), reinitializing defaults");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("no config file yet, starting from defaults");
                BTreeMap::new()
            }
            Err(err) => {
                warn!("config file is unreadable ({err}), reinitializing defaults");
                BTreeMap::new()
            }
        };

        for key in SETTING_KEYS {
            values.entry(key.to_string()).or_default();
        }

        let store = Self { path, values };
        store.save()?;
        Ok(store)
    }

    /// Default on-disk location for the settings file.
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("openlist-organizer").join("conf.json"),
            None => PathBuf::from("conf.json"),
        }
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Set one value and persist immediately.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating config directory {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing config file {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
