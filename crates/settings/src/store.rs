//! Path-addressed settings store

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use vaultset_core::{SettingMap, SettingPath, SettingValue};
use vaultset_crypto::{SettingsCipher, EMPTY_PAYLOAD};

use crate::codec;
use crate::config::StoreConfig;
use crate::defaults::default_settings;
use crate::merge::merge_settings;
use crate::storage::{FileStorage, SettingsStorage};
use crate::{Result, SettingsError};

/// How a successful [`SettingsStore::load`] obtained its overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Persisted overrides were decrypted and merged
    Merged,
    /// The payload could not be decrypted; merged with no overrides
    Recovered,
}

/// Owns the live settings tree and its persistence.
///
/// Reads never touch the resource. Every successful write is persisted
/// immediately. There is no internal locking: share a store across tasks
/// through an outer `Mutex`.
#[derive(Debug)]
pub struct SettingsStore {
    defaults: SettingMap,
    current: SettingMap,
    storage: Arc<dyn SettingsStorage>,
    cipher: SettingsCipher,
}

impl SettingsStore {
    /// Create a store whose live tree starts as a copy of `defaults`.
    ///
    /// `defaults` is expected to be a mapping; anything else is replaced by
    /// an empty one.
    pub fn new(defaults: SettingValue, storage: Arc<dyn SettingsStorage>, cipher: SettingsCipher) -> Self {
        let defaults = match defaults {
            SettingValue::Mapping(map) => map,
            other => {
                warn!("Default settings are a {}, using an empty tree", other.type_name());
                SettingMap::new()
            }
        };

        Self {
            current: defaults.clone(),
            defaults,
            storage,
            cipher,
        }
    }

    /// Store backed by the configured file, seeded with the compiled-in defaults
    pub fn from_config(config: StoreConfig) -> Self {
        let cipher = config.cipher();
        Self::new(default_settings(), Arc::new(FileStorage::new(config.path)), cipher)
    }

    /// The live tree
    pub fn current(&self) -> &SettingMap {
        &self.current
    }

    /// The tree the store was created with
    pub fn defaults(&self) -> &SettingMap {
        &self.defaults
    }

    pub fn storage(&self) -> &Arc<dyn SettingsStorage> {
        &self.storage
    }

    pub fn cipher(&self) -> &SettingsCipher {
        &self.cipher
    }

    /// Resolve a dotted path against the live tree
    pub fn lookup(&self, path: &str) -> Option<&SettingValue> {
        let path = SettingPath::parse(path);
        let (first, rest) = path.segments().split_first()?;

        let mut node = self.current.get(first)?;
        for segment in rest {
            node = node.as_mapping()?.get(segment)?;
        }
        Some(node)
    }

    /// Value at `path`, or `default` when any segment is missing or a
    /// non-mapping value sits in the way
    pub fn get(&self, path: &str, default: impl Into<SettingValue>) -> SettingValue {
        match self.lookup(path) {
            Some(value) => value.clone(),
            None => {
                debug!("Setting '{}' not found; returning default value", path);
                default.into()
            }
        }
    }

    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        self.lookup(path).and_then(SettingValue::as_bool).unwrap_or(default)
    }

    pub fn get_i32(&self, path: &str, default: i32) -> i32 {
        self.lookup(path).and_then(SettingValue::as_i32).unwrap_or(default)
    }

    pub fn get_f32(&self, path: &str, default: f32) -> f32 {
        self.lookup(path).and_then(SettingValue::as_f32).unwrap_or(default)
    }

    pub fn get_string(&self, path: &str, default: &str) -> String {
        self.lookup(path)
            .and_then(SettingValue::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Write `value` at `path` and persist the whole tree.
    ///
    /// Missing intermediate mappings are created and non-mapping values in
    /// the way are replaced. If persisting fails the in-memory write is kept
    /// and the error returned.
    pub async fn set(&mut self, path: &str, value: impl Into<SettingValue>) -> Result<()> {
        let path = match SettingPath::for_write(path) {
            Ok(path) => path,
            Err(e) => {
                error!("{}", e);
                return Err(e.into());
            }
        };
        let value = value.into();
        let shown = value.to_string();

        assign(&mut self.current, &path, value);

        if let Err(e) = self.save().await {
            error!("Setting '{}' updated in memory but not persisted: {}", path, e);
            return Err(e);
        }

        info!("Setting updated: {} = {}", path, shown);
        Ok(())
    }

    /// Serialize, encrypt and write the live tree
    pub async fn save(&self) -> Result<()> {
        match self.write_payload().await {
            Ok(()) => {
                info!("Successfully saved settings to {}", self.storage.location());
                Ok(())
            }
            Err(e) => {
                error!("Failed to save settings: {}", e);
                Err(e)
            }
        }
    }

    async fn write_payload(&self) -> Result<()> {
        let text = codec::encode(&self.current)?;
        let payload = self.cipher.encrypt(&text)?;

        self.storage
            .write_all(payload.as_bytes())
            .await
            .map_err(|source| SettingsError::Io {
                location: self.storage.location(),
                source,
            })
    }

    /// Read, decrypt and parse the persisted tree, then merge it over the
    /// live tree.
    ///
    /// A missing resource is first created from the live tree. A payload
    /// that fails to decrypt counts as no overrides. Parse failures and a
    /// non-mapping root leave the live tree untouched.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        info!("Loading settings from {}", self.storage.location());

        if !self.storage.exists().await {
            warn!("Settings file does not exist, saving default settings");
            self.save().await?;

            if !self.storage.exists().await {
                let location = self.storage.location();
                error!("Settings file {} missing right after saving", location);
                return Err(SettingsError::Missing(location));
            }
        }

        let raw = match self.storage.read_all().await {
            Ok(raw) => raw,
            Err(source) => {
                let location = self.storage.location();
                error!("Cannot read settings file {}: {}", location, source);
                return Err(SettingsError::Io { location, source });
            }
        };
        let encoded = String::from_utf8_lossy(&raw);

        let (text, outcome) = match self.cipher.decrypt(&encoded) {
            Ok(text) => (text, LoadOutcome::Merged),
            Err(e) => {
                warn!("Failed to decrypt settings file: {}; continuing with defaults", e);
                (EMPTY_PAYLOAD.to_string(), LoadOutcome::Recovered)
            }
        };

        let loaded = match codec::decode(&text) {
            Ok(SettingValue::Mapping(map)) => map,
            Ok(other) => {
                error!("Failed to parse settings file: root is a {}", other.type_name());
                return Err(SettingsError::NotAMapping(other.type_name()));
            }
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };

        self.current = merge_settings(&self.current, loaded);
        info!("Successfully merged settings");
        Ok(outcome)
    }
}

/// Descend `path` from `root`, creating (or replacing with) empty mappings
/// along the way, and write `value` at the leaf
fn assign(root: &mut SettingMap, path: &SettingPath, value: SettingValue) {
    let mut node = root;

    for segment in path.parents() {
        let entry = node
            .entry(segment.clone())
            .or_insert_with(SettingValue::empty_mapping);
        if !entry.is_mapping() {
            *entry = SettingValue::empty_mapping();
        }
        let SettingValue::Mapping(next) = entry else {
            return;
        };
        node = next;
    }

    if let Some(leaf) = path.leaf() {
        node.insert(leaf.to_string(), value);
    }
}
