//! Platform-specific paths

use std::path::PathBuf;

const APP_DIR: &str = "SecureLink";

/// Get the platform-specific config directory
///
/// Returns:
/// - Windows: %APPDATA%\SecureLink
/// - macOS: ~/Library/Application Support/SecureLink
/// - Linux/Other: ~/.config/SecureLink
pub fn get_config_dir() -> PathBuf {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_DIR)
}

/// Get the default settings file path
pub fn get_settings_path() -> PathBuf {
    get_config_dir().join("settings.toml")
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = get_config_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_path_layout() {
        let path = get_settings_path();
        assert!(path.ends_with("SecureLink/settings.toml"));
        assert_eq!(path.parent(), Some(get_config_dir().as_path()));
    }
}
