//! Store configuration

use std::fmt;
use std::path::PathBuf;

use tracing::warn;
use vaultset_crypto::{IvMode, SettingsCipher};
use vaultset_keystore::{default_config_dir, expand_path, resolve_passphrase, DEFAULT_PASSPHRASE};

/// File name of the persisted settings
pub const SETTINGS_FILE_NAME: &str = "user_settings.dat";

/// Get the default settings file path
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join(SETTINGS_FILE_NAME)
}

/// Where and how the settings are persisted
#[derive(Clone)]
pub struct StoreConfig {
    /// Settings file
    pub path: PathBuf,

    /// Encryption passphrase; empty stores plain JSON
    pub passphrase: String,

    /// IV selection for the cipher
    pub iv_mode: IvMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let passphrase = resolve_passphrase(None).unwrap_or_else(|e| {
            warn!("{}; falling back to the built-in passphrase", e);
            DEFAULT_PASSPHRASE.to_string()
        });

        Self {
            path: default_settings_path(),
            passphrase,
            iv_mode: IvMode::default(),
        }
    }
}

impl StoreConfig {
    /// Set the settings file path (`~` and `$VAR` are expanded)
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = expand_path(path);
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }

    pub fn with_iv_mode(mut self, iv_mode: IvMode) -> Self {
        self.iv_mode = iv_mode;
        self
    }

    pub fn cipher(&self) -> SettingsCipher {
        SettingsCipher::new(self.passphrase.clone()).with_iv_mode(self.iv_mode)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("path", &self.path)
            .field("passphrase", &"<redacted>")
            .field("iv_mode", &self.iv_mode)
            .finish()
    }
}
