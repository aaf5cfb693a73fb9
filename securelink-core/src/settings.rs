//! Display preferences.
//!
//! These only shape how results are presented; none of them changes how a
//! token is sealed or opened.

use crate::platform::get_settings_path;
use crate::{Result, SecureLinkError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// User display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Follow the recovered URL automatically after a successful open
    pub auto_redirect: bool,
    /// Seconds to wait before an automatic redirect
    pub redirect_delay: u32,
    /// Show the strength of passwords as they are entered
    pub show_password_strength: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_redirect: true,
            redirect_delay: 3,
            show_password_strength: true,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self =
            toml::from_str(&content).map_err(|e| SecureLinkError::Settings(e.to_string()))?;
        debug!(?path, "loaded settings");
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(?path, "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load settings for presentation, never failing
    ///
    /// An unreadable or malformed file is logged and replaced by defaults,
    /// since preferences must not block sealing or opening.
    pub fn load_or_warn(path: &Path) -> Self {
        Self::load_or_default(path).unwrap_or_else(|e| {
            warn!(?path, error = %e, "ignoring unusable settings file");
            Self::default()
        })
    }

    /// Load from the platform settings path
    pub fn load_default_location() -> Result<Self> {
        Self::load_or_default(&get_settings_path())
    }

    /// Save settings as TOML, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SecureLinkError::Settings(e.to_string()))?;
        std::fs::write(path, content)?;
        info!(?path, "saved settings");
        Ok(())
    }

    /// Set one preference by its name as shown in the settings file
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |expected: &str| {
            SecureLinkError::Settings(format!("{} expects {}, got {:?}", key, expected, value))
        };

        match key {
            "autoRedirect" => self.auto_redirect = value.parse().map_err(|_| invalid("true or false"))?,
            "redirectDelay" => self.redirect_delay = value.parse().map_err(|_| invalid("a number of seconds"))?,
            "showPasswordStrength" => {
                self.show_password_strength = value.parse().map_err(|_| invalid("true or false"))?
            }
            _ => return Err(SecureLinkError::Settings(format!("unknown setting {:?}", key))),
        }
        Ok(())
    }
}
