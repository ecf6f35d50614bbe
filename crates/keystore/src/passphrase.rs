use std::env::{self, VarError};

use tracing::debug;

use crate::{KeystoreError, Result};

/// Passphrase compiled into the program
pub const DEFAULT_PASSPHRASE: &str = "DefaultKey";

/// Environment variable overriding the compiled-in passphrase
pub const PASSPHRASE_ENV: &str = "VAULTSET_PASSPHRASE";

/// Resolve the settings passphrase.
///
/// An explicit value always wins (an empty one disables encryption), then
/// `VAULTSET_PASSPHRASE`, then [`DEFAULT_PASSPHRASE`].
pub fn resolve_passphrase(explicit: Option<&str>) -> Result<String> {
    pick_passphrase(explicit, env::var(PASSPHRASE_ENV))
}

fn pick_passphrase(explicit: Option<&str>, from_env: std::result::Result<String, VarError>) -> Result<String> {
    if let Some(passphrase) = explicit {
        return Ok(passphrase.to_string());
    }

    match from_env {
        Ok(passphrase) => {
            debug!("Using settings passphrase from {}", PASSPHRASE_ENV);
            Ok(passphrase)
        }
        Err(VarError::NotPresent) => Ok(DEFAULT_PASSPHRASE.to_string()),
        Err(VarError::NotUnicode(_)) => Err(KeystoreError::Env {
            name: PASSPHRASE_ENV.to_string(),
        }),
    }
}
