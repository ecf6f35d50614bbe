//! VaultSet App Framework
//!
//! Composition root for hosts embedding a VaultSet settings store.
//!
//! The host builds one [`App`] at startup, which initializes logging,
//! constructs the store and awaits the first load. Every component that needs
//! settings receives the [`SharedSettings`] handle. At teardown the host calls
//! [`App::shutdown`]; an `App` dropped without it still schedules a final save
//! on the running Tokio runtime without waiting for it.
//!
//! ## Usage
//!
//! ```no_run
//! use vaultset_app::App;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::builder()
//!         .name("my-game")
//!         .verbose(true)
//!         .build()
//!         .await;
//!
//!     let settings = app.settings();
//!     settings.lock().await.set("ExampleSettings.graphics", 2).await?;
//!
//!     app.shutdown().await?;
//!     Ok(())
//! }
//! ```

mod builder;

pub use builder::AppBuilder;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use vaultset_settings::SettingsStore;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Settings error: {0}")]
    Settings(#[from] vaultset_settings::SettingsError),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Store handle shared by everything in the host
pub type SharedSettings = Arc<Mutex<SettingsStore>>;

/// Initialized VaultSet host
pub struct App {
    name: String,
    version: String,
    settings: SharedSettings,
    shut_down: bool,
}

impl App {
    /// Create a new app builder
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the application name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the application version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the settings store
    pub fn settings(&self) -> SharedSettings {
        self.settings.clone()
    }

    /// Persist the settings one last time and tear down
    pub async fn shutdown(mut self) -> Result<()> {
        self.shut_down = true;
        self.settings.lock().await.save().await?;
        info!("{} shut down", self.name);
        Ok(())
    }

    /// Log startup banner
    pub fn log_startup(&self) {
        info!("╔════════════════════════════════════════╗");
        info!("║          VaultSet {:^12}         ║", self.version);
        info!("╠════════════════════════════════════════╣");
        info!("║  App: {:<32} ║", self.name);
        info!("╚════════════════════════════════════════╝");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if self.shut_down {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let settings = self.settings.clone();
                handle.spawn(async move {
                    // failures are logged by save()
                    let _ = settings.lock().await.save().await;
                });
            }
            Err(_) => warn!("{} dropped outside a Tokio runtime; settings not saved", self.name),
        }
    }
}
