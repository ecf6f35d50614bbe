use tracing::debug;
use vaultset_core::{SettingMap, SettingValue};

/// Merge persisted categories over the current tree.
///
/// Mapping-shaped categories of `current` are deep-copied into the result;
/// anything else at the top level of `current` is dropped. Each loaded
/// category then overrides the result key by key. A loaded category that is
/// not a mapping contributes no keys but still creates an empty category.
pub fn merge_settings(current: &SettingMap, loaded: SettingMap) -> SettingMap {
    let mut merged: SettingMap = current
        .iter()
        .filter(|(_, value)| value.is_mapping())
        .map(|(category, value)| (category.clone(), value.clone()))
        .collect();

    for (category, loaded_value) in loaded {
        // every entry of `merged` is a mapping at this point
        let entry = merged
            .entry(category.clone())
            .or_insert_with(SettingValue::empty_mapping);

        match (loaded_value, entry.as_mapping_mut()) {
            (SettingValue::Mapping(overrides), Some(target)) => target.extend(overrides),
            (other, _) => {
                debug!(
                    "Ignoring persisted category '{}': {} is not a mapping",
                    category,
                    other.type_name()
                );
            }
        }
    }

    merged
}
