use vaultset_core::SettingValue;

/// Compiled-in defaults, the template persisted overrides are merged onto.
///
/// New categories added here show up for existing users on their next load.
pub fn default_settings() -> SettingValue {
    SettingValue::mapping([
        (
            "ExampleSettings",
            SettingValue::mapping([
                ("master_volume", SettingValue::Float(1.0)),
                ("graphics", SettingValue::Integer(3)),
                ("someboolean", SettingValue::Bool(true)),
                ("somestring", SettingValue::from("example")),
            ]),
        ),
        (
            "You can add more categories,",
            SettingValue::mapping([
                ("and it'll automatically", "adapt to them"),
                ("you just need to run SaveSettings()", "to apply changes"),
            ]),
        ),
    ])
}
