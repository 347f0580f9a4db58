//! CLI configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/dcshare/config.toml`
//! - Windows: `%APPDATA%/dcshare/config.toml`

use std::path::{Path, PathBuf};

use dcshare_data_channel::FileShareConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Queued transport events per loopback endpoint.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// File-share endpoint settings.
    #[serde(default)]
    pub file_share: FileShareConfig,
}

fn default_channel_capacity() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            file_share: FileShareConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or creates a default there if missing.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // Restrict permissions on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the platform-specific configuration file path.
pub fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("dcshare").join("config.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("dcshare")
            .join("config.toml")
    }
}
