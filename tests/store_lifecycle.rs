//! Integration tests for the settings store against real files
//!
//! Covers the host-visible lifecycle:
//! 1. First load on a machine with no settings file
//! 2. Writes persisting across a fresh store
//! 3. Merging persisted overrides over defaults
//! 4. Rejected paths and corrupted files
//! 5. The app composition root (startup load, teardown save)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use vaultset_app::App;
use vaultset_crypto::SettingsCipher;
use vaultset_settings::{
    FileStorage, IvMode, LoadOutcome, SettingValue, SettingsError, SettingsStore, StoreConfig,
};

// =============================================================================
// HELPERS
// =============================================================================

fn settings_file(dir: &TempDir) -> PathBuf {
    dir.path().join("config").join("user_settings.dat")
}

fn open_store(path: &Path) -> SettingsStore {
    let config = StoreConfig::default()
        .with_path(&path.display().to_string())
        .with_passphrase("DefaultKey");
    SettingsStore::from_config(config)
}

// =============================================================================
// 1. FIRST LOAD
// =============================================================================

#[tokio::test]
async fn test_first_load_creates_file_with_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = settings_file(&dir);
    let mut store = open_store(&path);

    assert!(!path.exists());
    assert_eq!(store.load().await?, LoadOutcome::Merged);
    assert!(path.exists());

    assert_eq!(
        store.get("ExampleSettings.master_volume", 0.0f32),
        SettingValue::Float(1.0)
    );
    assert_eq!(store.get("ExampleSettings.graphics", 0), SettingValue::Integer(3));
    assert_eq!(store.get("ExampleSettings.someboolean", false), SettingValue::Bool(true));
    assert_eq!(
        store.get("ExampleSettings.somestring", ""),
        SettingValue::from("example")
    );
    Ok(())
}

#[tokio::test]
async fn test_get_never_touches_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = settings_file(&dir);
    let store = open_store(&path);

    let _ = store.get("ExampleSettings.graphics", 0);
    assert!(!path.exists());
    Ok(())
}

// =============================================================================
// 2. PERSISTENCE ACROSS STORES
// =============================================================================

#[tokio::test]
async fn test_set_persists_across_reload() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = settings_file(&dir);

    let mut store = open_store(&path);
    store.load().await?;
    store.set("A.b", "x").await?;
    store.set("ExampleSettings.graphics", 5).await?;
    drop(store);

    let mut fresh = open_store(&path);
    fresh.load().await?;
    assert_eq!(fresh.get("A.b", SettingValue::Null), SettingValue::from("x"));
    assert_eq!(fresh.get_i32("ExampleSettings.graphics", 0), 5);
    assert_eq!(fresh.get_f32("ExampleSettings.master_volume", 0.0), 1.0);
    Ok(())
}

#[tokio::test]
async fn test_set_without_prior_load_creates_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = settings_file(&dir);
    let mut store = open_store(&path);

    store.set("Audio.mixer.music", 0.5f32).await?;
    assert!(path.exists());

    let mut fresh = open_store(&path);
    fresh.load().await?;
    // `mixer` is a leaf mapping of the Audio category and survives whole
    assert_eq!(fresh.get_f32("Audio.mixer.music", 0.0), 0.5);
    Ok(())
}

#[tokio::test]
async fn test_random_iv_store_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = settings_file(&dir);
    let config = StoreConfig::default()
        .with_path(&path.display().to_string())
        .with_passphrase("DefaultKey")
        .with_iv_mode(IvMode::Random);

    let mut store = SettingsStore::from_config(config.clone());
    store.set("ExampleSettings.somestring", "random iv").await?;

    let mut fresh = SettingsStore::from_config(config);
    assert_eq!(fresh.load().await?, LoadOutcome::Merged);
    assert_eq!(fresh.get_string("ExampleSettings.somestring", ""), "random iv");
    Ok(())
}

// =============================================================================
// 3. MERGE WITH DEFAULTS
// =============================================================================

#[tokio::test]
async fn test_partial_file_keeps_untouched_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = settings_file(&dir);
    let payload = SettingsCipher::new("DefaultKey").encrypt(r#"{"A":{"b":"x"}}"#)?;
    std::fs::create_dir_all(path.parent().unwrap_or(dir.path()))?;
    std::fs::write(&path, payload)?;

    let mut store = open_store(&path);
    store.load().await?;

    assert_eq!(store.get("A.b", SettingValue::Null), SettingValue::from("x"));
    assert_eq!(
        store.get("ExampleSettings.master_volume", -1),
        SettingValue::Float(1.0)
    );
    assert!(store.lookup("You can add more categories,").is_some());
    Ok(())
}

// =============================================================================
// 4. REJECTED PATHS AND CORRUPTION
// =============================================================================

#[tokio::test]
async fn test_invalid_path_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut store = open_store(&settings_file(&dir));
    store.load().await?;
    let before = store.current().clone();

    let result = store.set("onlyonesegment", 1).await;
    assert!(matches!(result, Err(SettingsError::InvalidPath(_))));
    assert_eq!(
        store.get("onlyonesegment", "MISSING"),
        SettingValue::from("MISSING")
    );
    assert_eq!(store.current(), &before);
    Ok(())
}

#[tokio::test]
async fn test_garbage_file_degrades_to_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = settings_file(&dir);
    std::fs::create_dir_all(path.parent().unwrap_or(dir.path()))?;
    std::fs::write(&path, [0x00u8, 0x9f, 0x92, 0x96, 0xff, 0x10, b'?'])?;

    let mut store = open_store(&path);
    assert_eq!(store.load().await?, LoadOutcome::Recovered);
    assert_eq!(store.current(), store.defaults());

    // the next write replaces the garbage with a readable file
    store.set("ExampleSettings.graphics", 2).await?;
    let mut fresh = open_store(&path);
    assert_eq!(fresh.load().await?, LoadOutcome::Merged);
    assert_eq!(fresh.get_i32("ExampleSettings.graphics", 0), 2);
    Ok(())
}

#[tokio::test]
async fn test_unwritable_location_reports_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // a regular file where the parent directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"")?;
    let mut store = open_store(&blocker.join("user_settings.dat"));

    let result = store.set("ExampleSettings.graphics", 4).await;
    assert!(matches!(result, Err(SettingsError::Io { .. })));
    // in-memory value kept
    assert_eq!(store.get_i32("ExampleSettings.graphics", 0), 4);

    assert!(store.load().await.is_err());
    assert_eq!(store.get_i32("ExampleSettings.graphics", 0), 4);
    Ok(())
}

// =============================================================================
// 5. APP COMPOSITION ROOT
// =============================================================================

#[tokio::test]
async fn test_app_startup_and_shutdown() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = settings_file(&dir);

    let app = App::builder()
        .config_path(path.display().to_string())
        .passphrase("DefaultKey")
        .skip_logging()
        .build()
        .await;
    assert!(path.exists());

    app.settings()
        .lock()
        .await
        .set("ExampleSettings.someboolean", false)
        .await?;
    app.shutdown().await?;

    let app = App::builder()
        .config_path(path.display().to_string())
        .passphrase("DefaultKey")
        .skip_logging()
        .build()
        .await;
    assert!(!app.settings().lock().await.get_bool("ExampleSettings.someboolean", true));
    app.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_app_with_custom_storage() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("elsewhere.dat");

    let app = App::builder()
        .storage(Arc::new(FileStorage::new(&path)))
        .passphrase("")
        .skip_logging()
        .build()
        .await;
    app.shutdown().await?;

    // empty passphrase stores plain JSON
    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with('{'));
    assert!(text.contains("\"ExampleSettings\""));
    Ok(())
}
