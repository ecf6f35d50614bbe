//! VaultSet Settings
//!
//! Path-addressed settings store with encrypted-at-rest persistence.
//!
//! ## Features
//!
//! - Nested settings tree addressed by dotted paths (`Category.key`)
//! - Persisted overrides merged over compiled-in defaults on load
//! - AES-256-CBC + base64 on-disk payload, plain JSON with an empty passphrase
//! - Pluggable persistence resource (file, in-memory)
//!
//! ## Usage
//!
//! ```no_run
//! use vaultset_settings::{SettingsStore, StoreConfig};
//!
//! # async fn run() -> Result<(), vaultset_settings::SettingsError> {
//! let mut store = SettingsStore::from_config(StoreConfig::default());
//! store.load().await?;
//!
//! store.set("ExampleSettings.graphics", 5).await?;
//! let volume = store.get_f32("ExampleSettings.master_volume", 1.0);
//! # let _ = volume;
//! # Ok(())
//! # }
//! ```

pub mod codec;
mod config;
mod defaults;
mod merge;
mod storage;
mod store;

pub use config::{default_settings_path, StoreConfig, SETTINGS_FILE_NAME};
pub use defaults::default_settings;
pub use merge::merge_settings;
pub use storage::{FileStorage, MemoryStorage, SettingsStorage};
pub use store::{LoadOutcome, SettingsStore};

pub use vaultset_core::{SettingMap, SettingPath, SettingValue};
pub use vaultset_crypto::{IvMode, SettingsCipher};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{0}")]
    InvalidPath(#[from] vaultset_core::CoreError),

    #[error("Settings I/O failed on {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Parse(serde_json::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(serde_json::Error),

    #[error("Settings root is a {0}, expected a mapping")]
    NotAMapping(&'static str),

    #[error("Settings resource {0} still missing after writing defaults")]
    Missing(String),

    #[error("Failed to encrypt settings: {0}")]
    Cipher(#[from] vaultset_crypto::CipherError),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
