//! VaultSet Keystore
//!
//! Passphrase and path utilities shared by VaultSet crates.
//!
//! ## Features
//!
//! - Settings passphrase resolution (explicit, environment, compiled-in default)
//! - Cross-platform path expansion (~, environment variables)
//! - Per-user configuration directory lookup

mod passphrase;
mod paths;

pub use passphrase::{resolve_passphrase, DEFAULT_PASSPHRASE, PASSPHRASE_ENV};
pub use paths::{default_config_dir, expand_path, APP_DIR_NAME};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeystoreError {
    #[error("Environment variable {name} is not valid unicode")]
    Env { name: String },
}

pub type Result<T> = std::result::Result<T, KeystoreError>;
