//! App builder for fluent initialization

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use vaultset_logging::{try_init as try_init_logging, LogLevel};
use vaultset_settings::{
    default_settings, FileStorage, IvMode, LoadOutcome, SettingValue, SettingsStorage,
    SettingsStore, StoreConfig,
};

use crate::App;

/// Builder for creating VaultSet hosts
pub struct AppBuilder {
    name: Option<String>,
    version: Option<String>,
    verbose: bool,
    log_level: Option<LogLevel>,
    config_path: Option<String>,
    passphrase: Option<String>,
    iv_mode: Option<IvMode>,
    defaults: Option<SettingValue>,
    storage: Option<Arc<dyn SettingsStorage>>,
    skip_logging: bool,
    skip_load: bool,
    skip_banner: bool,
}

impl AppBuilder {
    /// Create a new app builder
    pub fn new() -> Self {
        Self {
            name: None,
            version: None,
            verbose: false,
            log_level: None,
            config_path: None,
            passphrase: None,
            iv_mode: None,
            defaults: None,
            storage: None,
            skip_logging: false,
            skip_load: false,
            skip_banner: false,
        }
    }

    /// Set the application name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the application version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Enable verbose logging (debug level)
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set explicit log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set custom settings file path (`~` and `$VAR` are expanded)
    pub fn config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Override the settings passphrase; an empty one stores plain JSON
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    pub fn iv_mode(mut self, iv_mode: IvMode) -> Self {
        self.iv_mode = Some(iv_mode);
        self
    }

    /// Replace the compiled-in default tree
    pub fn defaults(mut self, defaults: SettingValue) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Persist somewhere other than the settings file
    pub fn storage(mut self, storage: Arc<dyn SettingsStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Skip logging initialization (useful for tests)
    pub fn skip_logging(mut self) -> Self {
        self.skip_logging = true;
        self
    }

    /// Skip the initial settings load
    pub fn skip_load(mut self) -> Self {
        self.skip_load = true;
        self
    }

    /// Skip startup banner
    pub fn skip_banner(mut self) -> Self {
        self.skip_banner = true;
        self
    }

    fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::default();
        if let Some(path) = &self.config_path {
            config = config.with_path(path);
        }
        if let Some(passphrase) = &self.passphrase {
            config = config.with_passphrase(passphrase.clone());
        }
        if let Some(iv_mode) = self.iv_mode {
            config = config.with_iv_mode(iv_mode);
        }
        config
    }

    /// Build the application, awaiting the first settings load.
    ///
    /// A failed load is logged and the app starts with the defaults.
    pub async fn build(self) -> App {
        let name = self.name.clone().unwrap_or_else(|| "vaultset".to_string());
        let version = self
            .version
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

        // Initialize logging
        if !self.skip_logging {
            let level = self.log_level.unwrap_or(if self.verbose {
                LogLevel::Debug
            } else {
                LogLevel::Info
            });

            // Try to initialize, ignore if already initialized
            let _ = try_init_logging(level);
        }

        let config = self.store_config();
        let storage: Arc<dyn SettingsStorage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(FileStorage::new(config.path.clone())),
        };
        let defaults = self.defaults.unwrap_or_else(default_settings);
        let mut store = SettingsStore::new(defaults, storage, config.cipher());

        if !self.skip_load {
            match store.load().await {
                Ok(LoadOutcome::Merged) => debug!("Settings loaded"),
                Ok(LoadOutcome::Recovered) => warn!("Settings file unreadable, using defaults"),
                Err(e) => warn!("Starting with default settings: {}", e),
            }
        }

        let app = App {
            name,
            version,
            settings: Arc::new(Mutex::new(store)),
            shut_down: false,
        };

        // Log startup banner
        if !self.skip_banner && !self.skip_logging {
            app.log_startup();
        }

        app
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
