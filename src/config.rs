//! # Application Configuration
//!
//! Loads `config.toml` from the user's config directory
//! (`~/.config/padlabel/config.toml` on Linux). A default file is written on
//! first start; every field falls back to its default when absent, so partial
//! files keep working after upgrades.
//!
//! ```toml
//! [assets]
//! dir = "images"
//!
//! [window]
//! width = 1100.0
//! height = 720.0
//!
//! [defaults]
//! color = "#ffffff"
//! scale_percent = 40
//! code = ""
//!
//! [render]
//! font_size = 12.0
//! line_height = 12.0
//! arrow_head_length = 10.0
//! stroke_width = 2.0
//! ```

use crate::render::RenderSettings;
use crate::state::{ControllerState, DEFAULT_COLOR, DEFAULT_SCALE_PERCENT};
use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = "padlabel";
const CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub assets: AssetConfig,
    pub window: WindowConfig,
    pub defaults: StateDefaults,
    pub render: RenderSettings,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the controller PNGs
    pub dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("images"),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 720.0,
        }
    }
}

/// Initial diagram settings.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StateDefaults {
    pub color: String,
    pub scale_percent: i32,
    /// Code restored at startup; empty for a blank diagram
    pub code: String,
}

impl Default for StateDefaults {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            scale_percent: DEFAULT_SCALE_PERCENT,
            code: String::new(),
        }
    }
}

impl StateDefaults {
    pub fn initial_state(&self) -> ControllerState {
        ControllerState::new(self.color.clone(), self.scale_percent)
    }
}

impl AppConfig {
    /// Default location of the config file.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| {
            warn!("No config directory available, using the working directory");
            PathBuf::from(".")
        });
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        path
    }

    /// Loads the config at `path`, writing the defaults there if it does not exist.
    pub async fn load_or_create(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check if config file exists: {}", e))?
        {
            info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save(path).await?;
            return Ok(config);
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| eyre!("Failed to serialize config: {}", e))?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| eyre!("Failed to write config file: {}", e))?;
        Ok(())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| eyre!("Failed to parse config file: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = AppConfig::from_toml(
            r##"
            [defaults]
            color = "#00ff00"

            [render]
            font_size = 16.0
            "##,
        )
        .unwrap();

        assert_eq!(config.defaults.color, "#00ff00");
        assert_eq!(config.defaults.scale_percent, DEFAULT_SCALE_PERCENT);
        assert_eq!(config.render.font_size, 16.0);
        assert_eq!(config.render.arrow_head_length, 10.0);
        assert_eq!(config.assets.dir, PathBuf::from("images"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(AppConfig::from_toml("[window\nwidth = ").is_err());
        assert!(AppConfig::from_toml("[window]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn test_initial_state_from_defaults() {
        let defaults = StateDefaults {
            color: "#101010".into(),
            scale_percent: 75,
            code: String::new(),
        };
        let state = defaults.initial_state();
        assert_eq!(state.color(), "#101010");
        assert_eq!(state.scale_percent(), 75);
    }

    #[tokio::test]
    async fn test_load_or_create_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("padlabel-config-{}", std::process::id()));
        let path = dir.join(CONFIG_DIR).join(CONFIG_FILE);
        let _ = tokio::fs::remove_file(&path).await;

        let created = AppConfig::load_or_create(&path).await.unwrap();
        assert_eq!(created, AppConfig::default());
        assert!(path.exists());

        let mut changed = created.clone();
        changed.window.width = 640.0;
        changed.defaults.code = "abc".into();
        changed.save(&path).await.unwrap();

        let reloaded = AppConfig::load_or_create(&path).await.unwrap();
        assert_eq!(reloaded, changed);
    }
}
