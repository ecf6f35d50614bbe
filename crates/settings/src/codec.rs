//! Text encoding of the settings tree (compact JSON, keys sorted)

use serde::Serialize;
use vaultset_core::SettingValue;

use crate::{Result, SettingsError};

/// Serialize a settings tree (or a bare mapping) to canonical JSON text
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(SettingsError::Serialize)
}

/// Parse JSON text into a settings tree
pub fn decode(text: &str) -> Result<SettingValue> {
    let parsed: serde_json::Value = serde_json::from_str(text).map_err(SettingsError::Parse)?;
    Ok(SettingValue::from(parsed))
}
