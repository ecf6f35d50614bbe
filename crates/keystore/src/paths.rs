use std::path::PathBuf;

/// Directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "vaultset";

/// Per-user configuration directory (`<config dir>/vaultset`).
///
/// Falls back to `~/.vaultset`, then `./.vaultset` when the platform has no
/// notion of a config directory.
pub fn default_config_dir() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        return dir.join(APP_DIR_NAME);
    }
    let dot_dir = format!(".{}", APP_DIR_NAME);
    match dirs::home_dir() {
        Some(home) => home.join(dot_dir),
        None => PathBuf::from(dot_dir),
    }
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references.
///
/// If any referenced variable is unset, only `~` is expanded and the
/// variables are left as written.
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or_else(|_| shellexpand::tilde(path));
    PathBuf::from(expanded.as_ref())
}
